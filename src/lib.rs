//! statviz - Interactive Statistics Visualisations for Teaching
//!
//! statviz turns a handful of parameters into an annotated figure that
//! explains one idea from introductory statistics: type-I and type-II errors,
//! what a confidence level means, how the binomial approaches the Poisson,
//! why sample means look normal. The distribution math is built on numr's
//! scalar special functions.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 pages (nine visualisations)             │
//! └──────────────────────────┬──────────────────────────────┘
//!                            │ implement
//! ┌──────────────────────────▼──────────────────────────────┐
//! │  page: ParamSpec → ParameterSet → Figure → RenderSurface │
//! └───────┬──────────────────┬───────────────────┬──────────┘
//!         │                  │                   │
//! ┌───────▼──────┐  ┌────────▼────────┐  ┌───────▼─────────┐
//! │    stats     │  │     region      │  │ figure / render │
//! │ (pdf, cdf,   │  │ (domains and    │  │ (primitives,    │
//! │  quantiles,  │  │  region labels) │  │  SVG surface)   │
//! │  inference)  │  │                 │  │                 │
//! └──────────────┘  └─────────────────┘  └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`stats`] - Distributions, critical regions, confidence intervals,
//!   least squares, sampling
//! - [`region`] - Sampled x-domains and acceptance/rejection labels
//! - [`figure`] - Retained-mode figures built from drawing primitives
//! - [`render`] - Render surfaces (SVG files, in-memory)
//! - [`page`] - Parameter specs, the page contract and the orchestrator
//! - [`pages`] - The concrete pages
//!
//! # Example
//!
//! ```ignore
//! use statviz::page::{Defaults, Orchestrator, Session};
//! use statviz::render::SvgDirSurface;
//!
//! let page = statviz::pages::find("hypothesis-testing")?;
//! let mut surface = SvgDirSurface::new("out")?;
//! let mut session = Session::new();
//!
//! let outcome = Orchestrator::with_seed(7).run(page.as_ref(), &Defaults, &mut surface, &mut session);
//! assert!(outcome.is_rendered());
//! ```

pub mod figure;
pub mod page;
pub mod pages;
pub mod region;
pub mod render;
pub mod stats;

// Re-export main types for convenience
pub use figure::{Axes, ColorRole, Figure, FigureBuilder, FigureError, Primitive, Style};
pub use page::{
    Defaults, InputProvider, JsonInput, Orchestrator, Page, PageError, PageResult, ParamSpec,
    ParamValue, ParameterSet, RenderOutcome, Session,
};
pub use region::{Domain, Region, RegionLabel};
pub use render::{MemorySurface, RenderError, RenderSurface, SvgDirSurface};
pub use stats::{
    ConfidenceInterval, CriticalRegion, DistributionDescriptor, ErrorRates, Family,
    LinregressResult, StatsError, StatsResult, Tail,
};
