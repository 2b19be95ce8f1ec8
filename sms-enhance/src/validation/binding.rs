//! Wiring validation to page events.

use pagedom::{Dom, EventBus, EventKind, Selector};

use super::field::{clear_field, validate_field};
use super::form::controls;
use super::guard::SubmissionGuard;
use crate::error::Error;
use crate::notify::Banners;

/// Forms that opt out of native browser validation.
pub const FORMS: &str = "form[novalidate]";

/// Attach blur, input and submit handling to one form.
///
/// Blur validates the control so errors show as soon as focus leaves it.
/// Input clears a shown error immediately and does not re-validate until
/// the next blur or submit. Returns the number of controls bound.
pub fn bind_form(bus: &mut EventBus, dom: &Dom, form: &str, banners: Banners) -> Result<usize, Error> {
    let ids = dom.read(|doc| controls(doc, form))?;

    for id in &ids {
        let blur_dom = dom.clone();
        let blur_id = id.clone();
        bus.subscribe(id.as_str(), EventKind::Blur, move |_, _| {
            if let Err(e) = blur_dom.write(|doc| validate_field(doc, &blur_id)) {
                log::warn!("[validation] blur on {blur_id}: {e}");
            }
        });

        let input_dom = dom.clone();
        let input_id = id.clone();
        bus.subscribe(id.as_str(), EventKind::Input, move |_, _| {
            if let Err(e) = input_dom.write(|doc| clear_field(doc, &input_id)) {
                log::warn!("[validation] input on {input_id}: {e}");
            }
        });
    }

    let mut guard = SubmissionGuard::new(form, banners);
    let submit_dom = dom.clone();
    bus.subscribe(form, EventKind::Submit, move |_, dispatch| {
        match guard.on_submit(&submit_dom) {
            Ok(decision) if decision.is_blocked() => dispatch.prevent_default(),
            Ok(_) => {}
            Err(e) => log::warn!("[validation] submit on {}: {e}", guard.form()),
        }
    });

    log::debug!("[validation] bound {} control(s) in {form}", ids.len());
    Ok(ids.len())
}

/// Bind every `form[novalidate]` in the document. Returns the form IDs.
pub fn bind_forms(bus: &mut EventBus, dom: &Dom, banners: &Banners) -> Result<Vec<String>, Error> {
    let selector = Selector::parse(FORMS).map_err(pagedom::DomError::from)?;
    let forms = dom.read(|doc| doc.select(&selector));
    for form in &forms {
        bind_form(bus, dom, form, banners.clone())?;
    }
    Ok(forms)
}
