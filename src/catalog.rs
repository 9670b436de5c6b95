//! Enumerated algorithm catalog and its single-trace binding.
//!
//! The catalog is fixed at process start. Entries are addressed by numeric id,
//! and only entries with a registered [`TraceGenerator`] can produce traces;
//! the others are listed for the client but answer with
//! [`VisualizerError::NotImplemented`].

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::VisualizerError;
use crate::sorting::{
    BubbleSort, MAX_ELEMENTS, SortTracer, check_len, parse_array_or_default,
};
use crate::step::{StepRecorder, TraceStep};

/// Closed set of catalog entries; generators are wired by this tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    BubbleSort,
    SelectionSort,
    BinarySearch,
}

/// Catalog entry.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Algorithm {
    pub id: u32,
    #[serde(skip)]
    pub kind: AlgorithmKind,
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub example_inputs: Vec<&'static str>,
}

lazy_static! {
    static ref ALGORITHMS: Vec<Algorithm> = vec![
        Algorithm {
            id: 1,
            kind: AlgorithmKind::BubbleSort,
            name: "Bubble Sort",
            description: "A simple sorting algorithm that repeatedly steps through the list, compares adjacent elements and swaps them if they are in the wrong order.",
            category: "Sorting",
            example_inputs: vec!["64,34,25,12,22,11,90", "5,2,8,1,9,3", "100,50,25,75,125"],
        },
        Algorithm {
            id: 2,
            kind: AlgorithmKind::SelectionSort,
            name: "Selection Sort",
            description: "A sorting algorithm that divides the input list into two parts: a sorted sublist and an unsorted sublist.",
            category: "Sorting",
            example_inputs: vec!["64,34,25,12,22,11,90", "5,2,8,1,9,3", "100,50,25,75,125"],
        },
        Algorithm {
            id: 3,
            kind: AlgorithmKind::BinarySearch,
            name: "Binary Search",
            description: "A search algorithm that finds the position of a target value within a sorted array.",
            category: "Searching",
            example_inputs: vec![
                "1,3,5,7,9,11,13,15",
                "2,4,6,8,10,12,14,16",
                "10,20,30,40,50,60,70,80",
            ],
        },
    ];
}

pub fn algorithms() -> &'static [Algorithm] {
    &ALGORITHMS
}

pub fn algorithm_by_id(id: u32) -> Option<&'static Algorithm> {
    ALGORITHMS.iter().find(|a| a.id == id)
}

/// Generic input payload of the catalog binding.
///
/// Integer arrays are used as-is. Strings are parsed as comma separated
/// integers, and any other JSON value is parsed from its textual form; both
/// fall back to the default array when malformed.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TraceInput {
    Numbers(Vec<i32>),
    Text(String),
    Other(Value),
}

impl TraceInput {
    pub fn to_array(&self) -> Vec<i32> {
        match self {
            TraceInput::Numbers(values) => values.clone(),
            TraceInput::Text(text) => parse_array_or_default(text),
            TraceInput::Other(value) => parse_array_or_default(&value.to_string()),
        }
    }
}

impl Default for TraceInput {
    fn default() -> Self {
        TraceInput::Other(Value::Object(Default::default()))
    }
}

pub trait TraceGenerator {
    fn algorithm_name(&self) -> &'static str;
    fn generate_trace(&self, input: &TraceInput) -> Result<Vec<TraceStep>, VisualizerError>;
}

/// Bubble sort with every optional marker: `start`, `outer_loop`, `no_swap`
/// and `pass_complete`. Step numbers start at 1.
pub struct BubbleSortTraceGenerator {
    pub max_elements: usize,
}

impl Default for BubbleSortTraceGenerator {
    fn default() -> Self {
        BubbleSortTraceGenerator {
            max_elements: MAX_ELEMENTS,
        }
    }
}

impl TraceGenerator for BubbleSortTraceGenerator {
    fn algorithm_name(&self) -> &'static str {
        "Bubble Sort"
    }

    fn generate_trace(&self, input: &TraceInput) -> Result<Vec<TraceStep>, VisualizerError> {
        let mut array = input.to_array();
        check_len(&array, self.max_elements)?;

        let tracer = BubbleSort {
            no_swap_steps: true,
            pass_markers: true,
        };
        let mut rec = StepRecorder::new();
        tracer.trace(&mut array, &mut rec);
        rec.complete(&array);

        let mut trace: Vec<TraceStep> = rec.steps().iter().map(TraceStep::from).collect();
        if let Some(last) = trace.last_mut() {
            last.description =
                "Algorithm complete! Array is now sorted in ascending order.".to_string();
            if let Value::Object(state) = &mut last.state {
                state.insert("message".to_string(), Value::from("Bubble Sort complete!"));
            }
        }
        Ok(trace)
    }
}

/// Generator wired to a catalog entry, if any.
pub fn generator_for(
    algorithm: &Algorithm,
    max_elements: usize,
) -> Option<Box<dyn TraceGenerator>> {
    match algorithm.kind {
        AlgorithmKind::BubbleSort => Some(Box::new(BubbleSortTraceGenerator { max_elements })),
        AlgorithmKind::SelectionSort | AlgorithmKind::BinarySearch => None,
    }
}

/// Looks up entry `id` and its generator.
///
/// Fails with [`VisualizerError::AlgorithmNotFound`] for an unknown id and
/// [`VisualizerError::NotImplemented`] for an entry without a generator.
pub fn resolve_generator(
    id: u32,
    max_elements: usize,
) -> Result<Box<dyn TraceGenerator>, VisualizerError> {
    let algorithm = algorithm_by_id(id).ok_or(VisualizerError::AlgorithmNotFound(id))?;
    generator_for(algorithm, max_elements)
        .ok_or_else(|| VisualizerError::NotImplemented(algorithm.name.to_string()))
}

pub fn generate_trace(
    id: u32,
    input: &TraceInput,
    max_elements: usize,
) -> Result<Vec<TraceStep>, VisualizerError> {
    resolve_generator(id, max_elements)?.generate_trace(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::DEFAULT_ARRAY;
    use serde_json::json;

    #[test]
    fn lookup_by_id() {
        assert_eq!(algorithms().len(), 3);
        assert_eq!(algorithm_by_id(2).unwrap().name, "Selection Sort");
        assert!(algorithm_by_id(99).is_none());
    }

    #[test]
    fn generators_are_wired_by_kind() {
        let kinds: Vec<AlgorithmKind> = algorithms().iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AlgorithmKind::BubbleSort,
                AlgorithmKind::SelectionSort,
                AlgorithmKind::BinarySearch
            ]
        );

        let renamed = Algorithm {
            name: "Renamed",
            ..algorithm_by_id(1).unwrap().clone()
        };
        let generator = generator_for(&renamed, MAX_ELEMENTS).unwrap();
        assert_eq!(generator.algorithm_name(), "Bubble Sort");
        assert!(generator_for(algorithm_by_id(3).unwrap(), MAX_ELEMENTS).is_none());
    }

    #[test]
    fn resolver_reports_lookup_failures() {
        assert_eq!(
            resolve_generator(1, MAX_ELEMENTS).unwrap().algorithm_name(),
            "Bubble Sort"
        );
        assert_eq!(
            resolve_generator(99, MAX_ELEMENTS).err(),
            Some(VisualizerError::AlgorithmNotFound(99))
        );
        assert_eq!(
            resolve_generator(2, MAX_ELEMENTS).err(),
            Some(VisualizerError::NotImplemented("Selection Sort".into()))
        );
    }

    #[test]
    fn kind_tag_is_not_serialized() {
        let value = serde_json::to_value(algorithm_by_id(1).unwrap()).unwrap();
        assert!(value.get("kind").is_none());
        assert_eq!(value["exampleInputs"][0], "64,34,25,12,22,11,90");
    }

    #[test]
    fn bubble_trace_numbers_from_one() {
        let trace = generate_trace(1, &TraceInput::Numbers(vec![3, 1, 2]), MAX_ELEMENTS).unwrap();

        for (i, step) in trace.iter().enumerate() {
            assert_eq!(step.step_number, i + 1);
        }
        assert_eq!(trace[0].action, "start");
        assert_eq!(trace[1].action, "outer_loop");
        assert_eq!(trace[1].state["outerIndex"], 0);

        let last = trace.last().unwrap();
        assert_eq!(last.action, "complete");
        assert_eq!(last.state["array"], json!([1, 2, 3]));
        assert_eq!(last.state["message"], "Bubble Sort complete!");
    }

    #[test]
    fn bubble_trace_records_no_swap() {
        let trace = generate_trace(1, &TraceInput::Numbers(vec![1, 2]), MAX_ELEMENTS).unwrap();
        let actions: Vec<&str> = trace.iter().map(|s| s.action.as_str()).collect();
        assert_eq!(
            actions,
            vec!["start", "outer_loop", "compare", "no_swap", "pass_complete", "complete"]
        );
        assert_eq!(trace[4].state["sortedCount"], 1);
    }

    #[test]
    fn text_input_is_parsed_or_replaced() {
        assert_eq!(TraceInput::Text("5, 2,8".into()).to_array(), vec![5, 2, 8]);
        assert_eq!(TraceInput::Text("5,a".into()).to_array(), DEFAULT_ARRAY.to_vec());
        assert_eq!(TraceInput::Other(json!(7)).to_array(), vec![7]);
        assert_eq!(TraceInput::Other(json!({"a": 1})).to_array(), DEFAULT_ARRAY.to_vec());
    }

    #[test]
    fn untagged_input_deserializes_each_shape() {
        let numbers: TraceInput = serde_json::from_value(json!([4, 2])).unwrap();
        assert_eq!(numbers, TraceInput::Numbers(vec![4, 2]));
        let text: TraceInput = serde_json::from_value(json!("4,2")).unwrap();
        assert_eq!(text, TraceInput::Text("4,2".into()));
        let other: TraceInput = serde_json::from_value(json!([1.5])).unwrap();
        assert!(matches!(other, TraceInput::Other(_)));
    }

    #[test]
    fn entries_without_generator_are_not_implemented() {
        let err = generate_trace(2, &TraceInput::default(), MAX_ELEMENTS).unwrap_err();
        assert_eq!(err, VisualizerError::NotImplemented("Selection Sort".into()));
        let err = generate_trace(3, &TraceInput::default(), MAX_ELEMENTS).unwrap_err();
        assert_eq!(err, VisualizerError::NotImplemented("Binary Search".into()));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let err = generate_trace(42, &TraceInput::default(), MAX_ELEMENTS).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn oversized_input_fails_generation() {
        let input = TraceInput::Numbers((0..30).collect());
        let err = generate_trace(1, &input, MAX_ELEMENTS).unwrap_err();
        assert_eq!(err, VisualizerError::InputTooLarge { len: 30, max: 20 });
    }
}
