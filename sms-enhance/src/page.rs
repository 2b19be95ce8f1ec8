//! Page bootstrap: wires every component to the page's events.

use std::sync::Arc;

use pagedom::{Dispatch, Dom, Event, EventBus, EventKind};

use crate::charts::{self, ChartConfig};
use crate::config::EnhanceConfig;
use crate::delete::{Confirm, DeleteController, DeleteOutcome};
use crate::error::Error;
use crate::export::{Downloads, EXPORT_BUTTON, ExportController};
use crate::hints::{self, Hint};
use crate::navigate::Navigator;
use crate::notify::Banners;
use crate::portal::Portal;
use crate::search::{SEARCH_INPUT, SearchController};
use crate::sort::SortHeaders;
use crate::validation;

/// The outside world the page talks to.
#[derive(Clone)]
pub struct Services {
    pub navigator: Arc<dyn Navigator>,
    pub portal: Arc<dyn Portal>,
    pub downloads: Arc<dyn Downloads>,
    pub confirm: Arc<dyn Confirm>,
}

/// An enhanced page.
///
/// [`Enhancer::attach`] runs once the document is loaded. Afterwards page
/// events go through [`Enhancer::dispatch`], which runs listeners in
/// registration order and reports whether the default action was cancelled.
///
/// # Example
///
/// ```ignore
/// let mut page = Enhancer::attach(dom.clone(), services, EnhanceConfig::default())?;
///
/// page.type_into("search-box", "ada")?;
/// let outcome = page.dispatch(&Event::submit("student-form"));
/// if !outcome.is_default_prevented() {
///     submit_form();
/// }
/// ```
pub struct Enhancer {
    dom: Dom,
    bus: EventBus,
    banners: Banners,
    hints: Vec<Hint>,
    forms: Vec<String>,
    sort: Option<SortHeaders>,
    export: Option<ExportController>,
    deleter: DeleteController,
    charts: Vec<(String, ChartConfig)>,
}

impl Enhancer {
    /// Bind behaviour to whatever the page contains.
    ///
    /// Components whose elements are absent are skipped.
    pub fn attach(dom: Dom, services: Services, config: EnhanceConfig) -> Result<Self, Error> {
        let mut bus = EventBus::new();
        let banners = Banners::new(dom.clone(), config.banner_dismiss);

        let hints = hints::collect_hints(&dom)?;
        hints::dismiss_alerts_after(&dom, config.banner_dismiss);
        let forms = validation::bind_forms(&mut bus, &dom, &banners)?;

        let search = dom.read(|doc| doc.query(SEARCH_INPUT))?;
        if let Some(input) = &search {
            let mut controller = SearchController::new(Arc::clone(&services.navigator), config.search_debounce);
            bus.subscribe(input.as_str(), EventKind::Input, move |event, _| {
                if let Event::Input { value, .. } = event {
                    controller.on_input(value);
                }
            });
        }

        let sort = SortHeaders::discover(dom.clone(), Arc::clone(&services.navigator))?;
        for header in sort.headers() {
            let headers = sort.clone();
            let id = header.clone();
            bus.subscribe(header.as_str(), EventKind::Click, move |_, _| {
                if let Err(e) = headers.on_click(&id) {
                    log::warn!("[sort] click on {id}: {e}");
                }
            });
        }
        let sort = (!sort.headers().is_empty()).then_some(sort);

        let export = dom.read(|doc| doc.query(EXPORT_BUTTON))?.map(|button| {
            ExportController::new(
                dom.clone(),
                button,
                Arc::clone(&services.portal),
                Arc::clone(&services.navigator),
                Arc::clone(&services.downloads),
                banners.clone(),
            )
            .with_filename(config.export_filename.as_str())
        });
        if let Some(controller) = &export {
            let controller = controller.clone();
            bus.subscribe(controller.button().to_string(), EventKind::Click, move |_, dispatch| {
                dispatch.prevent_default();
                controller.trigger();
            });
        }

        let deleter = DeleteController::new(
            Arc::clone(&services.portal),
            Arc::clone(&services.navigator),
            Arc::clone(&services.confirm),
            banners.clone(),
            config.reload_delay,
        );

        let charts = charts::bootstrap_charts(&dom)?;

        log::debug!(
            "[page] attached: {} hint(s), {} form(s), search={}, {} sort header(s), export={}, {} chart(s)",
            hints.len(),
            forms.len(),
            search.is_some(),
            sort.as_ref().map_or(0, |s| s.headers().len()),
            export.is_some(),
            charts.len()
        );

        Ok(Self {
            dom,
            bus,
            banners,
            hints,
            forms,
            sort,
            export,
            deleter,
            charts,
        })
    }

    /// Deliver a page event to the bound listeners.
    pub fn dispatch(&mut self, event: &Event) -> Dispatch {
        self.bus.dispatch(event)
    }

    /// Set a control's value and fire the keystroke event for it.
    pub fn type_into(&mut self, id: &str, value: &str) -> Result<Dispatch, Error> {
        self.dom.write(|doc| doc.set_value(id, value))?;
        Ok(self.dispatch(&Event::input(id, value)))
    }

    /// Confirm and delete a student, reporting the result with a banner.
    pub async fn delete_student(&self, student_id: u64) -> DeleteOutcome {
        self.deleter.delete_student(student_id).await
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn banners(&self) -> &Banners {
        &self.banners
    }

    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }

    /// IDs of the forms with validation bound.
    pub fn forms(&self) -> &[String] {
        &self.forms
    }

    pub fn sort_headers(&self) -> Option<&SortHeaders> {
        self.sort.as_ref()
    }

    pub fn export(&self) -> Option<&ExportController> {
        self.export.as_ref()
    }

    /// Chart configurations for the canvases on the page, keyed by canvas ID.
    pub fn charts(&self) -> &[(String, ChartConfig)] {
        &self.charts
    }
}

impl std::fmt::Debug for Enhancer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enhancer")
            .field("bus", &self.bus)
            .field("forms", &self.forms)
            .field("hints", &self.hints.len())
            .field("charts", &self.charts.len())
            .finish()
    }
}
