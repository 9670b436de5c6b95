use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use crate::error::VisualizerError;
use crate::step::{DataStructureStep, StepStatus};

/// No structure grows past this length. `set`, `push` and `enqueue` report an
/// `error` step instead.
pub const MAX_STRUCTURE_LEN: usize = 100;

/// Longest operation script the HTTP binding replays.
pub const MAX_SCRIPT_LINES: usize = 200;

type Preset = (&'static str, &'static [&'static str]);

const ARRAY_OPERATIONS: &[&str] = &["set", "get", "search"];
const STACK_OPERATIONS: &[&str] = &["push", "pop", "peek", "isEmpty"];
const QUEUE_OPERATIONS: &[&str] = &["enqueue", "dequeue", "front", "isEmpty"];

const ARRAY_EXAMPLES: &[Preset] = &[
    (
        "Basic operations",
        &["set 0 10", "set 1 20", "set 2 30", "get 1", "search 20"],
    ),
    (
        "Searching an array",
        &["set 0 5", "set 1 15", "set 2 25", "search 15", "search 100"],
    ),
    (
        "Working with indices",
        &["set 0 1", "set 1 2", "set 2 3", "get 0", "get 1", "get 2"],
    ),
];

const STACK_EXAMPLES: &[Preset] = &[
    ("Push and pop", &["push 10", "push 20", "push 30", "pop", "pop"]),
    (
        "Peek operations",
        &["push 5", "peek", "push 10", "peek", "pop", "peek"],
    ),
    ("Empty check", &["isEmpty", "push 1", "isEmpty", "pop", "isEmpty"]),
];

const QUEUE_EXAMPLES: &[Preset] = &[
    (
        "Enqueue and dequeue",
        &["enqueue 10", "enqueue 20", "enqueue 30", "dequeue", "dequeue"],
    ),
    (
        "Front operations",
        &["enqueue 5", "front", "enqueue 10", "front", "dequeue", "front"],
    ),
    (
        "Empty check",
        &["isEmpty", "enqueue 1", "isEmpty", "dequeue", "isEmpty"],
    ),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureKind {
    Array,
    Stack,
    Queue,
}

impl StructureKind {
    pub const ALL: [StructureKind; 3] = [
        StructureKind::Array,
        StructureKind::Stack,
        StructureKind::Queue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StructureKind::Array => "array",
            StructureKind::Stack => "stack",
            StructureKind::Queue => "queue",
        }
    }

    fn model(&self) -> Box<dyn StructureModel> {
        match self {
            StructureKind::Array => Box::new(ArrayModel::default()),
            StructureKind::Stack => Box::new(StackModel::default()),
            StructureKind::Queue => Box::new(QueueModel::default()),
        }
    }

    fn describe(&self) -> DataStructure {
        let (name, description, operations, examples) = match self {
            StructureKind::Array => (
                "Array",
                "Linear structure of elements of the same type, addressed by index",
                ARRAY_OPERATIONS,
                ARRAY_EXAMPLES,
            ),
            StructureKind::Stack => (
                "Stack",
                "LIFO (Last In, First Out) data structure",
                STACK_OPERATIONS,
                STACK_EXAMPLES,
            ),
            StructureKind::Queue => (
                "Queue",
                "FIFO (First In, First Out) data structure",
                QUEUE_OPERATIONS,
                QUEUE_EXAMPLES,
            ),
        };

        DataStructure {
            name: name.to_string(),
            description: description.to_string(),
            kind: *self,
            operations: operations.iter().map(|op| op.to_string()).collect(),
            examples: examples
                .iter()
                .map(|(name, ops)| ExampleScript {
                    name: name.to_string(),
                    operations: ops.iter().map(|op| op.to_string()).collect(),
                })
                .collect(),
            steps: Vec::new(),
        }
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StructureKind {
    type Err = VisualizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "array" => Ok(StructureKind::Array),
            "stack" => Ok(StructureKind::Stack),
            "queue" => Ok(StructureKind::Queue),
            _ => Err(VisualizerError::UnsupportedStructure(s.to_string())),
        }
    }
}

/// A named preset script shown by the client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExampleScript {
    pub name: String,
    pub operations: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataStructure {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: StructureKind,
    pub operations: Vec<String>,
    pub examples: Vec<ExampleScript>,
    pub steps: Vec<DataStructureStep>,
}

/// What one recognized command did, minus the snapshot and id.
struct Outcome {
    operation: &'static str,
    description: String,
    highlight_index: Option<usize>,
    status: StepStatus,
    message: Option<String>,
}

impl Outcome {
    fn new(operation: &'static str, status: StepStatus, description: impl Into<String>) -> Self {
        Outcome {
            operation,
            description: description.into(),
            highlight_index: None,
            status,
            message: None,
        }
    }

    fn highlight(mut self, index: usize) -> Self {
        self.highlight_index = Some(index);
        self
    }

    fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// In-memory model a script is replayed against.
trait StructureModel {
    /// Runs one command. `None` means the verb or its arguments were not
    /// understood and the line is skipped.
    fn apply(&mut self, verb: &str, args: &[&str]) -> Option<Outcome>;
    fn snapshot(&self) -> Vec<i32>;
}

fn one_value(args: &[&str]) -> Option<i32> {
    match args {
        [value] => value.parse().ok(),
        _ => None,
    }
}

fn one_index(args: &[&str]) -> Option<usize> {
    match args {
        [index] => index.parse().ok(),
        _ => None,
    }
}

#[derive(Default)]
struct ArrayModel {
    items: Vec<i32>,
}

impl StructureModel for ArrayModel {
    fn apply(&mut self, verb: &str, args: &[&str]) -> Option<Outcome> {
        match verb {
            "set" => {
                let [index, value] = args else { return None };
                let index: usize = index.parse().ok()?;
                let value: i32 = value.parse().ok()?;
                if index >= MAX_STRUCTURE_LEN {
                    return Some(
                        Outcome::new(
                            "set",
                            StepStatus::Error,
                            format!("Attempted to set value {} at index {}", value, index),
                        )
                        .message(format!(
                            "Index exceeds the maximum array length of {}",
                            MAX_STRUCTURE_LEN
                        )),
                    );
                }
                if self.items.len() <= index {
                    self.items.resize(index + 1, 0);
                }
                self.items[index] = value;
                Some(
                    Outcome::new(
                        "set",
                        StepStatus::Success,
                        format!("Setting value {} at index {}", value, index),
                    )
                    .highlight(index),
                )
            }
            "get" => {
                let index = one_index(args)?;
                Some(match self.items.get(index) {
                    Some(value) => Outcome::new(
                        "get",
                        StepStatus::Info,
                        format!("Reading value {} from index {}", value, index),
                    )
                    .highlight(index)
                    .message(format!("Value: {}", value)),
                    None => Outcome::new(
                        "get",
                        StepStatus::Error,
                        format!("Attempted to read from invalid index {}", index),
                    )
                    .message("Index is out of the array bounds"),
                })
            }
            "search" => {
                let value = one_value(args)?;
                Some(match self.items.iter().position(|&v| v == value) {
                    Some(found) => Outcome::new(
                        "search",
                        StepStatus::Success,
                        format!("Found value {} at index {}", value, found),
                    )
                    .highlight(found)
                    .message(format!("Found at index {}", found)),
                    None => Outcome::new(
                        "search",
                        StepStatus::Warning,
                        format!("Searching for value {} - not found", value),
                    )
                    .message("The value was not found in the array"),
                })
            }
            _ => None,
        }
    }

    fn snapshot(&self) -> Vec<i32> {
        self.items.clone()
    }
}

#[derive(Default)]
struct StackModel {
    items: Vec<i32>,
}

impl StructureModel for StackModel {
    fn apply(&mut self, verb: &str, args: &[&str]) -> Option<Outcome> {
        match verb {
            "push" => {
                let value = one_value(args)?;
                if self.items.len() >= MAX_STRUCTURE_LEN {
                    return Some(full_outcome("push", value, "stack"));
                }
                self.items.push(value);
                Some(
                    Outcome::new(
                        "push",
                        StepStatus::Success,
                        format!("Pushing {} onto the top of the stack", value),
                    )
                    .highlight(self.items.len() - 1),
                )
            }
            "pop" if args.is_empty() => Some(match self.items.pop() {
                Some(value) => Outcome::new(
                    "pop",
                    StepStatus::Info,
                    format!("Removing {} from the top of the stack", value),
                )
                .message(format!("Removed value: {}", value)),
                None => Outcome::new(
                    "pop",
                    StepStatus::Error,
                    "Attempted to pop from an empty stack",
                )
                .message("The stack is empty"),
            }),
            "peek" if args.is_empty() => Some(match self.items.last() {
                Some(value) => Outcome::new(
                    "peek",
                    StepStatus::Info,
                    format!("Looking at the top of the stack: {}", value),
                )
                .highlight(self.items.len() - 1)
                .message(format!("Top of the stack: {}", value)),
                None => Outcome::new(
                    "peek",
                    StepStatus::Error,
                    "Attempted to peek at an empty stack",
                )
                .message("The stack is empty"),
            }),
            "isempty" if args.is_empty() => Some(is_empty_outcome(self.items.is_empty(), "stack")),
            _ => None,
        }
    }

    fn snapshot(&self) -> Vec<i32> {
        self.items.clone()
    }
}

#[derive(Default)]
struct QueueModel {
    items: VecDeque<i32>,
}

impl StructureModel for QueueModel {
    fn apply(&mut self, verb: &str, args: &[&str]) -> Option<Outcome> {
        match verb {
            "enqueue" => {
                let value = one_value(args)?;
                if self.items.len() >= MAX_STRUCTURE_LEN {
                    return Some(full_outcome("enqueue", value, "queue"));
                }
                self.items.push_back(value);
                Some(
                    Outcome::new(
                        "enqueue",
                        StepStatus::Success,
                        format!("Adding {} to the back of the queue", value),
                    )
                    .highlight(self.items.len() - 1),
                )
            }
            "dequeue" if args.is_empty() => Some(match self.items.pop_front() {
                Some(value) => Outcome::new(
                    "dequeue",
                    StepStatus::Info,
                    format!("Removing {} from the front of the queue", value),
                )
                .message(format!("Removed value: {}", value)),
                None => Outcome::new(
                    "dequeue",
                    StepStatus::Error,
                    "Attempted to dequeue from an empty queue",
                )
                .message("The queue is empty"),
            }),
            "front" if args.is_empty() => Some(match self.items.front() {
                Some(value) => Outcome::new(
                    "front",
                    StepStatus::Info,
                    format!("Looking at the first element: {}", value),
                )
                .highlight(0)
                .message(format!("First element: {}", value)),
                None => Outcome::new(
                    "front",
                    StepStatus::Error,
                    "Attempted to read the front of an empty queue",
                )
                .message("The queue is empty"),
            }),
            "isempty" if args.is_empty() => Some(is_empty_outcome(self.items.is_empty(), "queue")),
            _ => None,
        }
    }

    fn snapshot(&self) -> Vec<i32> {
        self.items.iter().copied().collect()
    }
}

fn full_outcome(operation: &'static str, value: i32, noun: &str) -> Outcome {
    Outcome::new(
        operation,
        StepStatus::Error,
        format!("Attempted to add {} to a full {}", value, noun),
    )
    .message(format!(
        "The {} is full (at most {} elements)",
        noun, MAX_STRUCTURE_LEN
    ))
}

fn is_empty_outcome(empty: bool, noun: &str) -> Outcome {
    Outcome::new(
        "isEmpty",
        StepStatus::Info,
        format!(
            "Checking whether the {} is empty: {}",
            noun,
            if empty { "yes" } else { "no" }
        ),
    )
    .message(if empty {
        format!("The {} is empty", noun)
    } else {
        format!("The {} is not empty", noun)
    })
}

/// Replays `script` line by line against a fresh structure of `kind`.
///
/// Lines with an unknown verb or the wrong argument shape are skipped without
/// a step. Every other line yields exactly one step holding the contents
/// after the command.
pub fn simulate<S: AsRef<str>>(kind: StructureKind, script: &[S]) -> DataStructure {
    let mut model = kind.model();
    let mut steps = Vec::new();

    for line in script {
        let mut tokens = line.as_ref().split_whitespace();
        let Some(verb) = tokens.next() else { continue };
        let args: Vec<&str> = tokens.collect();

        if let Some(outcome) = model.apply(&verb.to_lowercase(), &args) {
            steps.push(DataStructureStep {
                id: steps.len(),
                operation: outcome.operation.to_string(),
                description: outcome.description,
                data: model.snapshot(),
                highlight_index: outcome.highlight_index,
                status: outcome.status,
                message: outcome.message,
            });
        }
    }

    debug!(
        "{} script of {} lines produced {} steps",
        kind,
        script.len(),
        steps.len()
    );

    let mut structure = kind.describe();
    structure.steps = steps;
    structure
}

/// Like [`simulate`] but rejects scripts longer than `max_lines`.
pub fn simulate_checked<S: AsRef<str>>(
    kind: StructureKind,
    script: &[S],
    max_lines: usize,
) -> Result<DataStructure, VisualizerError> {
    if script.len() > max_lines {
        return Err(VisualizerError::InputTooLarge {
            len: script.len(),
            max: max_lines,
        });
    }
    Ok(simulate(kind, script))
}

/// Metadata of every supported structure, with empty step lists.
pub fn catalog() -> Vec<DataStructure> {
    StructureKind::ALL.iter().map(|kind| kind.describe()).collect()
}
