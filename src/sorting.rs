use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::VisualizerError;
use crate::step::{Highlight, Step, StepAction, StepRecorder};

/// Substituted for textual input that does not parse.
pub const DEFAULT_ARRAY: [i32; 7] = [64, 34, 25, 12, 22, 11, 90];

/// Largest array the request bindings accept by default.
pub const MAX_ELEMENTS: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortAlgorithm {
    Bubble,
    Quick,
    Selection,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 3] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Quick,
        SortAlgorithm::Selection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "bubble",
            SortAlgorithm::Quick => "quick",
            SortAlgorithm::Selection => "selection",
        }
    }

    /// Registry from kind tag to implementation.
    pub fn tracer(&self, options: &SortOptions) -> Box<dyn SortTracer> {
        match self {
            SortAlgorithm::Bubble => Box::new(BubbleSort {
                no_swap_steps: options.no_swap_steps,
                pass_markers: options.pass_markers,
            }),
            SortAlgorithm::Quick => Box::new(QuickSort),
            SortAlgorithm::Selection => Box::new(SelectionSort),
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortAlgorithm {
    type Err = VisualizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bubble" => Ok(SortAlgorithm::Bubble),
            "quick" => Ok(SortAlgorithm::Quick),
            "selection" => Ok(SortAlgorithm::Selection),
            _ => Err(VisualizerError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Optional step kinds of the bubble sort trace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOptions {
    /// Emit a `no_swap` step when a comparison leaves the pair in place.
    pub no_swap_steps: bool,
    /// Emit `outer_loop` / `pass_complete` markers around every pass.
    pub pass_markers: bool,
}

impl SortOptions {
    pub fn verbose() -> Self {
        SortOptions {
            no_swap_steps: true,
            pass_markers: true,
        }
    }
}

/// Static facts about a sorting algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlgorithmInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
    pub is_stable: bool,
    pub is_in_place: bool,
}

/// A sorting algorithm that narrates itself into a [`StepRecorder`].
///
/// Implementations sort `array` in place and record every comparison and
/// swap. The trailing `complete` step is appended by [`generate`], not here.
pub trait SortTracer {
    fn info(&self) -> AlgorithmInfo;
    fn trace(&self, array: &mut [i32], rec: &mut StepRecorder);
}

/// Metadata plus full trace, the response of the direct sorting binding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortingAlgorithm {
    pub name: String,
    pub description: String,
    pub time_complexity: String,
    pub space_complexity: String,
    pub is_stable: bool,
    pub is_in_place: bool,
    pub steps: Vec<Step>,
}

impl SortingAlgorithm {
    fn from_info(info: AlgorithmInfo, steps: Vec<Step>) -> Self {
        SortingAlgorithm {
            name: info.name.to_string(),
            description: info.description.to_string(),
            time_complexity: info.time_complexity.to_string(),
            space_complexity: info.space_complexity.to_string(),
            is_stable: info.is_stable,
            is_in_place: info.is_in_place,
            steps,
        }
    }
}

/// Runs `kind` over a private copy of `input` and returns the complete trace.
pub fn generate(kind: SortAlgorithm, input: &[i32], options: &SortOptions) -> SortingAlgorithm {
    let tracer = kind.tracer(options);
    let mut array = input.to_vec();
    let mut rec = StepRecorder::new();

    tracer.trace(&mut array, &mut rec);
    rec.complete(&array);

    debug!("{} sort over {} elements produced {} steps", kind, input.len(), rec.len());
    SortingAlgorithm::from_info(tracer.info(), rec.finish())
}

/// Like [`generate`] but rejects arrays longer than `max_elements`.
pub fn generate_checked(
    kind: SortAlgorithm,
    input: &[i32],
    options: &SortOptions,
    max_elements: usize,
) -> Result<SortingAlgorithm, VisualizerError> {
    check_len(input, max_elements)?;
    Ok(generate(kind, input, options))
}

pub fn check_len(input: &[i32], max_elements: usize) -> Result<(), VisualizerError> {
    if input.len() > max_elements {
        return Err(VisualizerError::InputTooLarge {
            len: input.len(),
            max: max_elements,
        });
    }
    Ok(())
}

/// Metadata of every supported sort, with empty step lists.
pub fn catalog() -> Vec<SortingAlgorithm> {
    let options = SortOptions::default();
    SortAlgorithm::ALL
        .iter()
        .map(|kind| SortingAlgorithm::from_info(kind.tracer(&options).info(), Vec::new()))
        .collect()
}

/// Parses comma separated integers. Whitespace around tokens and empty
/// tokens are ignored.
pub fn parse_array(text: &str) -> Result<Vec<i32>, VisualizerError> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<i32>()
                .map_err(|_| VisualizerError::MalformedArray(token.to_string()))
        })
        .collect()
}

/// Lenient variant of [`parse_array`]: any malformed token replaces the
/// whole input with [`DEFAULT_ARRAY`].
pub fn parse_array_or_default(text: &str) -> Vec<i32> {
    match parse_array(text) {
        Ok(array) => array,
        Err(e) => {
            warn!("{}; substituting the default array", e);
            DEFAULT_ARRAY.to_vec()
        }
    }
}

pub struct BubbleSort {
    pub no_swap_steps: bool,
    pub pass_markers: bool,
}

impl SortTracer for BubbleSort {
    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            name: "Bubble Sort",
            description: "Compares adjacent elements and swaps them if they are in the wrong order",
            time_complexity: "O(n²)",
            space_complexity: "O(1)",
            is_stable: true,
            is_in_place: true,
        }
    }

    fn trace(&self, arr: &mut [i32], rec: &mut StepRecorder) {
        let n = arr.len();
        let passes = n.saturating_sub(1);

        rec.push(
            Step::new(
                StepAction::Start,
                "Initializing the algorithm with the input array",
                arr,
            )
            .with_message("Starting Bubble Sort algorithm"),
        );

        for i in 0..passes {
            if self.pass_markers {
                rec.push(
                    Step::new(
                        StepAction::OuterLoop,
                        format!("Beginning pass {} of {}", i + 1, passes),
                        arr,
                    )
                    .with_pass(i)
                    .with_message(format!("Starting pass {}", i + 1)),
                );
            }

            for j in 0..n - i - 1 {
                rec.push(
                    Step::new(
                        StepAction::Compare,
                        format!("Comparing {} and {}", arr[j], arr[j + 1]),
                        arr,
                    )
                    .with_indices([j, j + 1])
                    .with_highlight(Highlight::Compare)
                    .with_message(format!("Comparing elements at positions {} and {}", j, j + 1)),
                );

                if arr[j] > arr[j + 1] {
                    arr.swap(j, j + 1);
                    rec.push(
                        Step::new(
                            StepAction::Swap,
                            format!(
                                "Swapped {} and {} because {} > {}",
                                arr[j + 1],
                                arr[j],
                                arr[j + 1],
                                arr[j]
                            ),
                            arr,
                        )
                        .with_indices([j, j + 1])
                        .with_highlight(Highlight::Swap)
                        .with_message(format!("Swapped {} and {}", arr[j + 1], arr[j])),
                    );
                } else if self.no_swap_steps {
                    rec.push(
                        Step::new(
                            StepAction::NoSwap,
                            format!("No swap needed: {} <= {}", arr[j], arr[j + 1]),
                            arr,
                        )
                        .with_indices([j, j + 1])
                        .with_message("No swap needed"),
                    );
                }
            }

            if self.pass_markers {
                rec.push(
                    Step::new(
                        StepAction::PassComplete,
                        format!(
                            "Pass {} complete. Largest {} elements are now in their correct positions.",
                            i + 1,
                            i + 1
                        ),
                        arr,
                    )
                    .with_pass(i)
                    .with_message(format!("Pass {} complete", i + 1)),
                );
            }
        }
    }
}

pub struct SelectionSort;

impl SortTracer for SelectionSort {
    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            name: "Selection Sort",
            description: "Finds the smallest remaining element and moves it to the front",
            time_complexity: "O(n²)",
            space_complexity: "O(1)",
            is_stable: false,
            is_in_place: true,
        }
    }

    fn trace(&self, arr: &mut [i32], rec: &mut StepRecorder) {
        let n = arr.len();

        for i in 0..n.saturating_sub(1) {
            let mut min_idx = i;

            rec.push(
                Step::new(
                    StepAction::FindMin,
                    format!("Searching for the smallest element from position {}", i),
                    arr,
                )
                .with_indices([i])
                .with_highlight(Highlight::Current),
            );

            for j in i + 1..n {
                rec.push(
                    Step::new(
                        StepAction::Compare,
                        format!("Comparing {} with the current minimum {}", arr[j], arr[min_idx]),
                        arr,
                    )
                    .with_indices([j, min_idx])
                    .with_highlight(Highlight::Compare),
                );

                if arr[j] < arr[min_idx] {
                    min_idx = j;
                }
            }

            if min_idx != i {
                // snapshot shows the pair before the exchange
                rec.push(
                    Step::new(
                        StepAction::Swap,
                        format!("Swapping {} and {}", arr[i], arr[min_idx]),
                        arr,
                    )
                    .with_indices([i, min_idx])
                    .with_highlight(Highlight::Swap),
                );
                arr.swap(i, min_idx);
            }
        }
    }
}

/// Lomuto partition scheme, pivot is the last element of each subrange.
pub struct QuickSort;

impl QuickSort {
    fn sort_range(arr: &mut [i32], low: usize, high: usize, rec: &mut StepRecorder) {
        if low >= high {
            return;
        }
        let p = Self::partition(arr, low, high, rec);
        if p > low {
            Self::sort_range(arr, low, p - 1, rec);
        }
        Self::sort_range(arr, p + 1, high, rec);
    }

    fn partition(arr: &mut [i32], low: usize, high: usize, rec: &mut StepRecorder) -> usize {
        let pivot = arr[high];
        // first slot not yet known to hold an element smaller than the pivot
        let mut store = low;

        rec.push(
            Step::new(StepAction::Pivot, format!("Choosing pivot: {}", pivot), arr)
                .with_indices([high])
                .with_highlight(Highlight::Pivot),
        );

        for j in low..high {
            rec.push(
                Step::new(
                    StepAction::Compare,
                    format!("Comparing {} with pivot {}", arr[j], pivot),
                    arr,
                )
                .with_indices([j, high])
                .with_highlight(Highlight::Compare),
            );

            if arr[j] < pivot {
                if store != j {
                    rec.push(
                        Step::new(
                            StepAction::Swap,
                            format!("Swapping {} and {}", arr[store], arr[j]),
                            arr,
                        )
                        .with_indices([store, j])
                        .with_highlight(Highlight::Swap),
                    );
                    arr.swap(store, j);
                }
                store += 1;
            }
        }

        // Recorded even when store == high and the swap is a no-op, unlike
        // the self-swaps skipped in the loop above.
        rec.push(
            Step::new(
                StepAction::Swap,
                "Placing the pivot in its correct position",
                arr,
            )
            .with_indices([store, high])
            .with_highlight(Highlight::Swap),
        );
        arr.swap(store, high);
        store
    }
}

impl SortTracer for QuickSort {
    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            name: "Quick Sort",
            description: "Picks a pivot element and partitions the array into smaller and larger parts",
            time_complexity: "O(n log n)",
            space_complexity: "O(log n)",
            is_stable: false,
            is_in_place: true,
        }
    }

    fn trace(&self, arr: &mut [i32], rec: &mut StepRecorder) {
        if arr.len() > 1 {
            Self::sort_range(arr, 0, arr.len() - 1, rec);
        }
    }
}
