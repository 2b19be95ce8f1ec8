mod common;

use std::sync::Arc;
use std::time::Duration;

use pagedom::Content;
use sms_client::ExportFile;
use sms_client::query::{self, ORDER, PAGE, SORT, SortOrder};
use sms_enhance::delete::{DELETE_FAILED, DeleteController, DeleteOutcome};
use sms_enhance::export::{DirectoryDownloads, Downloads, EXPORT_FAILED, ExportController, LOADING_MARKUP};
use sms_enhance::navigate::{MemoryNavigator, Navigator};
use sms_enhance::notify::Banners;
use sms_enhance::sort::{ORDER_ATTR, SortHeaders};

use common::{Behaviour, CSV, FakePortal, MemoryDownloads, always, banner_texts, dom, list_url};

// ============================================================================
// Sort headers
// ============================================================================

#[test]
fn test_sort_first_click_ascending_then_toggles() {
    let dom = dom();
    let navigator = MemoryNavigator::new(list_url());
    let sort = SortHeaders::discover(dom.clone(), Arc::new(navigator.clone())).unwrap();
    assert_eq!(sort.headers(), ["th-name".to_string(), "th-cgpa".to_string()]);

    assert_eq!(sort.on_click("th-name").unwrap(), ("name".to_string(), SortOrder::Asc));
    let url = navigator.location();
    assert_eq!(query::get_param(&url, SORT).as_deref(), Some("name"));
    assert_eq!(query::get_param(&url, ORDER).as_deref(), Some("asc"));
    assert_eq!(query::get_param(&url, PAGE), None);

    let th = dom.element("th-name").unwrap();
    assert_eq!(th.get_attr(ORDER_ATTR), Some("asc"));
    assert!(th.has_class("sort-asc"));

    sort.on_click("th-name").unwrap();
    assert_eq!(query::get_param(&navigator.location(), ORDER).as_deref(), Some("desc"));
    assert!(dom.element("th-name").unwrap().has_class("sort-desc"));
    assert!(!dom.element("th-name").unwrap().has_class("sort-asc"));

    sort.on_click("th-name").unwrap();
    assert_eq!(query::get_param(&navigator.location(), ORDER).as_deref(), Some("asc"));
}

#[test]
fn test_sort_click_resets_other_headers() {
    let dom = dom();
    let navigator = MemoryNavigator::new(list_url());
    let sort = SortHeaders::discover(dom.clone(), Arc::new(navigator.clone())).unwrap();

    sort.on_click("th-name").unwrap();
    sort.on_click("th-cgpa").unwrap();

    let name = dom.element("th-name").unwrap();
    assert_eq!(name.get_attr(ORDER_ATTR), Some(""));
    assert!(!name.has_class("sort-asc"));

    let url = navigator.location();
    assert_eq!(query::get_param(&url, SORT).as_deref(), Some("cgpa"));
    assert_eq!(query::get_param(&url, ORDER).as_deref(), Some("asc"));
    assert_eq!(navigator.visited().len(), 2);
}

// ============================================================================
// Export
// ============================================================================

fn exporter(
    dom: &pagedom::Dom,
    portal: Arc<FakePortal>,
    downloads: Arc<dyn Downloads>,
) -> ExportController {
    ExportController::new(
        dom.clone(),
        "export",
        portal,
        Arc::new(MemoryNavigator::new(list_url())),
        downloads,
        Banners::new(dom.clone(), Duration::from_secs(5)),
    )
}

#[tokio::test]
async fn test_export_saves_file_and_restores_button() {
    let dom = dom();
    let portal = Arc::new(FakePortal::new(Behaviour::Succeed).probing(dom.clone(), "export"));
    let downloads = Arc::new(MemoryDownloads::default());

    let path = exporter(&dom, portal.clone(), downloads.clone()).run().await.unwrap();

    assert_eq!(path.to_str(), Some("students_export.csv"));
    assert_eq!(downloads.files(), vec![("students_export.csv".to_string(), CSV.to_vec())]);
    assert_eq!(portal.calls(), vec![format!("export {}", list_url())]);

    let during = portal.button_during_export.lock().unwrap().clone().unwrap();
    assert_eq!(during.content, Content::Markup(LOADING_MARKUP.to_string()));
    assert!(during.disabled);

    let after = dom.element("export").unwrap();
    assert_eq!(after.text_content(), "Export CSV");
    assert!(!after.disabled);
    assert!(banner_texts(&dom).is_empty());
}

#[tokio::test]
async fn test_export_failure_shows_banner_and_restores_button() {
    let dom = dom();
    let portal = Arc::new(FakePortal::new(Behaviour::Fail));
    let downloads = Arc::new(MemoryDownloads::default());

    let result = exporter(&dom, portal, downloads.clone()).run().await;

    assert!(matches!(result, Err(sms_enhance::Error::Client(_))));
    assert!(downloads.files().is_empty());
    assert_eq!(banner_texts(&dom), vec![EXPORT_FAILED.to_string()]);

    let after = dom.element("export").unwrap();
    assert_eq!(after.text_content(), "Export CSV");
    assert!(!after.disabled);
}

#[tokio::test]
async fn test_export_trigger_runs_in_background() {
    let dom = dom();
    let downloads = Arc::new(MemoryDownloads::default());
    let controller = exporter(&dom, Arc::new(FakePortal::new(Behaviour::Succeed)), downloads.clone())
        .with_filename("list.csv");

    let handle = controller.trigger().unwrap();
    handle.await.unwrap().unwrap();

    assert_eq!(downloads.files()[0].0, "list.csv");
}

#[tokio::test(start_paused = true)]
async fn test_second_click_during_export_is_ignored() {
    let dom = dom();
    let portal = Arc::new(FakePortal::new(Behaviour::Succeed).slow(Duration::from_millis(100)));
    let downloads = Arc::new(MemoryDownloads::default());
    let controller = exporter(&dom, portal.clone(), downloads.clone());

    let first = controller.trigger().unwrap();
    tokio::task::yield_now().await;
    assert!(dom.element("export").unwrap().disabled);

    let second = controller.trigger().unwrap();
    assert!(matches!(
        second.await.unwrap(),
        Err(sms_enhance::Error::ExportInProgress)
    ));
    first.await.unwrap().unwrap();

    let button = dom.element("export").unwrap();
    assert_eq!(button.content, Content::Text("Export CSV".to_string()));
    assert!(!button.disabled);
    assert_eq!(portal.calls().len(), 1);
    assert_eq!(downloads.files().len(), 1);
    assert!(banner_texts(&dom).is_empty());
}

#[test]
fn test_export_trigger_without_runtime() {
    let dom = dom();
    let controller = exporter(
        &dom,
        Arc::new(FakePortal::new(Behaviour::Succeed)),
        Arc::new(MemoryDownloads::default()),
    );
    assert!(controller.trigger().is_none());
    assert!(!dom.element("export").unwrap().disabled);
}

#[tokio::test]
async fn test_directory_downloads_writes_file() {
    let dir = std::env::temp_dir().join(format!("sms-export-{}", uuid::Uuid::new_v4()));
    let downloads = DirectoryDownloads::new(&dir);
    let file = ExportFile {
        content_type: Some("text/html".to_string()),
        bytes: CSV.to_vec(),
    };

    let path = downloads.save("students_export.csv", &file).await.unwrap();

    assert_eq!(path, dir.join("students_export.csv"));
    assert_eq!(tokio::fs::read(&path).await.unwrap(), CSV);
    tokio::fs::remove_dir_all(&dir).await.unwrap();
}

// ============================================================================
// Delete
// ============================================================================

fn deleter(dom: &pagedom::Dom, behaviour: Behaviour, confirm: bool) -> (DeleteController, Arc<FakePortal>, MemoryNavigator) {
    let portal = Arc::new(FakePortal::new(behaviour));
    let navigator = MemoryNavigator::new(list_url());
    let controller = DeleteController::new(
        portal.clone(),
        Arc::new(navigator.clone()),
        always(confirm),
        Banners::new(dom.clone(), Duration::from_secs(5)),
        Duration::from_millis(1500),
    );
    (controller, portal, navigator)
}

#[tokio::test(start_paused = true)]
async fn test_delete_success_reloads_after_delay() {
    let dom = dom();
    let (controller, portal, navigator) = deleter(&dom, Behaviour::Succeed, true);

    let outcome = controller.delete_student(42).await;

    assert_eq!(outcome, DeleteOutcome::Deleted("Student deleted successfully.".to_string()));
    assert_eq!(portal.calls(), vec!["delete 42".to_string()]);
    assert_eq!(banner_texts(&dom), vec!["Student deleted successfully.".to_string()]);
    assert_eq!(navigator.reloads(), 0);

    tokio::time::sleep(Duration::from_millis(1400)).await;
    assert_eq!(navigator.reloads(), 0);

    tokio::time::sleep(Duration::from_millis(200)).await;
    tokio::task::yield_now().await;
    assert_eq!(navigator.reloads(), 1);
}

#[tokio::test]
async fn test_delete_cancelled_sends_nothing() {
    let dom = dom();
    let (controller, portal, _) = deleter(&dom, Behaviour::Succeed, false);

    assert_eq!(controller.delete_student(42).await, DeleteOutcome::Cancelled);
    assert!(portal.calls().is_empty());
    assert!(banner_texts(&dom).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_delete_refused_shows_server_message() {
    let dom = dom();
    let (controller, _, navigator) = deleter(&dom, Behaviour::Refuse, true);

    let outcome = controller.delete_student(7).await;

    assert_eq!(outcome, DeleteOutcome::Rejected("Student has active enrollments.".to_string()));
    assert_eq!(banner_texts(&dom), vec!["Student has active enrollments.".to_string()]);
    let banner = &common::select_in(&dom, "container", ".alert")[0];
    assert!(dom.element(banner).unwrap().has_class("alert-danger"));

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(navigator.reloads(), 0);
}

#[tokio::test]
async fn test_delete_failure_shows_generic_message() {
    let dom = dom();
    let (controller, _, _) = deleter(&dom, Behaviour::Fail, true);

    assert_eq!(controller.delete_student(7).await, DeleteOutcome::Failed);
    assert_eq!(banner_texts(&dom), vec![DELETE_FAILED.to_string()]);
}
