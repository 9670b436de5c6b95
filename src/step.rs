use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Suggested playback time for one step, in milliseconds.
pub const DEFAULT_STEP_DURATION: u32 = 1000;

/// What kind of event a sorting [`Step`] records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepAction {
    Start,
    OuterLoop,
    Compare,
    Swap,
    NoSwap,
    PassComplete,
    Pivot,
    FindMin,
    Complete,
}

impl StepAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepAction::Start => "start",
            StepAction::OuterLoop => "outer_loop",
            StepAction::Compare => "compare",
            StepAction::Swap => "swap",
            StepAction::NoSwap => "no_swap",
            StepAction::PassComplete => "pass_complete",
            StepAction::Pivot => "pivot",
            StepAction::FindMin => "find_min",
            StepAction::Complete => "complete",
        }
    }
}

/// Rendering hint for the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    Compare,
    Swap,
    Pivot,
    Current,
    Complete,
}

/// One recorded moment of a sorting algorithm.
///
/// `array` is always a full copy of the working array, never a diff.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: usize,
    pub action: StepAction,
    pub description: String,
    pub array: Vec<i32>,
    pub indices: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Highlight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass: Option<usize>,
    pub is_completed: bool,
    pub duration: u32,
}

impl Step {
    /// Builds a step with a snapshot of `array`. The id is assigned when the
    /// step is handed to a [`StepRecorder`].
    pub fn new(action: StepAction, description: impl Into<String>, array: &[i32]) -> Self {
        Step {
            id: 0,
            action,
            description: description.into(),
            array: array.to_vec(),
            indices: Vec::new(),
            highlight: None,
            message: None,
            pass: None,
            is_completed: false,
            duration: DEFAULT_STEP_DURATION,
        }
    }

    pub fn with_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices = indices.into_iter().collect();
        self
    }

    pub fn with_highlight(mut self, highlight: Highlight) -> Self {
        self.highlight = Some(highlight);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_pass(mut self, pass: usize) -> Self {
        self.pass = Some(pass);
        self
    }
}

/// Caller-owned step buffer threaded by `&mut` through every generator,
/// including recursive ones, so ids stay sequential across the whole trace.
#[derive(Debug, Default)]
pub struct StepRecorder {
    steps: Vec<Step>,
    next_id: usize,
}

impl StepRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns the next id and appends the step.
    pub fn push(&mut self, mut step: Step) {
        step.id = self.next_id;
        self.next_id += 1;
        self.steps.push(step);
    }

    /// Appends the final `complete` step.
    pub fn complete(&mut self, array: &[i32]) {
        let mut step = Step::new(StepAction::Complete, "The array is sorted!", array)
            .with_highlight(Highlight::Complete);
        step.is_completed = true;
        self.push(step);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn finish(self) -> Vec<Step> {
        self.steps
    }
}

/// Status tag of a data-structure step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Success,
    Info,
    Warning,
    Error,
}

/// One interpreted command of a data-structure script. `data` is the full
/// contents of the structure after the command ran.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataStructureStep {
    pub id: usize,
    pub operation: String,
    pub description: String,
    pub data: Vec<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_index: Option<usize>,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Step shape of the catalog binding: 1-based `stepNumber` and a free-form
/// `state` object instead of flat fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceStep {
    pub step_number: usize,
    pub action: String,
    pub state: Value,
    pub description: String,
}

impl From<&Step> for TraceStep {
    fn from(step: &Step) -> Self {
        let mut state = Map::new();
        state.insert("array".to_string(), json!(step.array));
        match step.action {
            StepAction::Compare | StepAction::Swap | StepAction::NoSwap => {
                if let &[left, right, ..] = step.indices.as_slice() {
                    state.insert("leftIndex".to_string(), json!(left));
                    state.insert("rightIndex".to_string(), json!(right));
                }
            }
            StepAction::OuterLoop => {
                if let Some(pass) = step.pass {
                    state.insert("outerIndex".to_string(), json!(pass));
                }
            }
            StepAction::PassComplete => {
                if let Some(pass) = step.pass {
                    state.insert("sortedCount".to_string(), json!(pass + 1));
                }
            }
            _ => {}
        }
        if let Some(message) = &step.message {
            state.insert("message".to_string(), json!(message));
        }

        TraceStep {
            step_number: step.id + 1,
            action: step.action.as_str().to_string(),
            state: Value::Object(state),
            description: step.description.clone(),
        }
    }
}
