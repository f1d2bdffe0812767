//! Page contract and the orchestrator that runs it.
//!
//! Every page follows the same sequence:
//!
//! 1. collect a [`ParameterSet`] from an [`InputProvider`] using the page's
//!    [`ParamSpec`]s,
//! 2. validate ranges and options,
//! 3. build a [`Figure`](crate::figure::Figure) from the page's layout,
//! 4. let the page draw on it,
//! 5. hand the figure to a [`RenderSurface`],
//! 6. show the page's explanation, if it has one.
//!
//! Any failure becomes a message on the surface and a
//! [`RenderOutcome::Failed`]; it never aborts the process.

mod error;
mod input;
mod params;
mod session;

pub use error::{PageError, PageResult};
pub use input::{Defaults, InputProvider, JsonInput};
pub use params::{ParamKind, ParamSpec, ParamValue, ParameterSet, Refine};
pub use session::Session;

use crate::figure::{Figure, FigureBuilder};
use crate::render::RenderSurface;
use crate::stats::seeded_rng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

/// One interactive visualisation.
pub trait Page {
    /// Stable identifier, used for file names and lookup.
    fn id(&self) -> &'static str;

    /// Human-readable heading.
    fn title(&self) -> &'static str;

    /// Inputs in collection order.
    fn params(&self) -> Vec<ParamSpec>;

    /// Figure layout for the given inputs.
    fn layout(&self, params: &ParameterSet) -> FigureBuilder {
        let _ = params;
        FigureBuilder::new(self.title())
    }

    /// Draw the page onto `figure`.
    fn plot(
        &self,
        figure: &mut Figure,
        params: &ParameterSet,
        session: &mut Session,
        rng: &mut StdRng,
    ) -> PageResult<()>;

    /// Markdown explanation as `(title, body)`.
    fn explanation(&self) -> Option<(&'static str, &'static str)> {
        None
    }
}

/// What happened to one run.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// Figure shown; carries the number of drawn primitives.
    Rendered { primitives: usize },
    /// The run stopped; the message was shown on the surface.
    Failed { message: String },
}

impl RenderOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }
}

/// Collect and validate every parameter of `page` from `input`.
///
/// Specs are resolved in order, so a spec may refine its bounds from the
/// values collected before it.
pub fn collect_params(page: &dyn Page, input: &dyn InputProvider) -> PageResult<ParameterSet> {
    let mut set = ParameterSet::new();
    for spec in page.params() {
        let spec = spec.resolve(&set);
        let raw = input.value(&spec).unwrap_or_else(|| spec.default_value());
        let value = spec.validate(&raw)?;
        set.insert(spec.name, value);
    }
    Ok(set)
}

/// Runs pages against a render surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct Orchestrator {
    seed: Option<u64>,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw Monte-Carlo pages from a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Run one page to completion.
    pub fn run(
        &self,
        page: &dyn Page,
        input: &dyn InputProvider,
        surface: &mut dyn RenderSurface,
        session: &mut Session,
    ) -> RenderOutcome {
        match self.try_run(page, input, surface, session) {
            Ok(primitives) => {
                info!(page = page.id(), primitives, "rendered");
                RenderOutcome::Rendered { primitives }
            }
            Err(e) => {
                let message = e.to_string();
                warn!(page = page.id(), %message, "render failed");
                if let Err(surface_err) = surface.show_error(page.id(), &message) {
                    warn!(page = page.id(), error = %surface_err, "could not show error");
                }
                RenderOutcome::Failed { message }
            }
        }
    }

    fn try_run(
        &self,
        page: &dyn Page,
        input: &dyn InputProvider,
        surface: &mut dyn RenderSurface,
        session: &mut Session,
    ) -> PageResult<usize> {
        let params = collect_params(page, input)?;
        debug!(page = page.id(), ?params, "parameters");

        let mut figure = page.layout(&params).build()?;
        let mut rng = seeded_rng(self.seed);
        page.plot(&mut figure, &params, session, &mut rng)?;

        surface.show_figure(page.id(), &figure)?;
        if let Some((title, body)) = page.explanation() {
            surface.show_markdown(page.id(), title, body)?;
        }

        session.remember(page.id(), params);
        Ok(figure.primitive_count())
    }
}
