/*!
# Algorithm Visualizer

A web backend that turns classic sorting algorithms and elementary data
structures into replayable step traces for a browser client to animate.

## Overview

Instead of just computing a result, every generator records an ordered log of
the comparisons, swaps and structural mutations it performs. Each entry carries
a full snapshot of the working data, the positions involved, a human-readable
description and a highlight hint, so the client can step forward and backward
at any speed without re-running anything.

## Architecture

### Frontend Layer
- **Technologies**: HTML, CSS, JavaScript (served from the static directory)
- Playback controls, speed slider and array/script input live entirely in the
  browser; the backend only produces traces.

### Backend Layer
- **Technologies**: Rust, axum
- **Core Components**:
  - Step model - Sorting steps, data-structure steps and catalog trace steps
  - Sorting Trace Generator - Bubble, selection and quick sort
  - Data-Structure Trace Generator - Array, stack and queue script interpreter
  - Algorithm Catalog - Static list of algorithms with a trace binding

Every request builds its own working copy, runs the generator to completion
and returns the whole trace in one response. No state survives a request.

## Modules

- **step**: Step records and the sequential step recorder
- **sorting**: Sorting trace generator, textual array parsing
- **structures**: Data-structure script interpreter
- **catalog**: Enumerated algorithm catalog and its trace generators
- **config**: Server configuration from environment and arguments
- **error**: Error types (and HTTP mapping with the `web` feature)
- **app**: Routing and handlers (`web` feature)

## REST API Endpoints

- `GET /api/algorithms`, `GET /api/algorithms/:id` - Catalog entries
- `POST /api/algorithms/:id/trace` - Trace for a catalog entry
- `GET /api/sorting`, `POST /api/sorting/steps` - Sorting metadata and traces
- `GET /api/structures`, `POST /api/structures/steps` - Structure metadata and traces
*/

#[cfg(feature = "web")]
pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod sorting;
pub mod step;
pub mod structures;

pub use catalog::{Algorithm, AlgorithmKind, TraceGenerator, TraceInput};
pub use config::ServerConfig;
pub use error::VisualizerError;
pub use sorting::{SortAlgorithm, SortOptions, SortTracer, SortingAlgorithm};
pub use step::*;
pub use structures::{DataStructure, StructureKind};
