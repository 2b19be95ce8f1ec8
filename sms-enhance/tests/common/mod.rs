#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pagedom::{Document, Dom, Element, Selector};
use sms_client::error::{ApiError, Error as ClientError};
use sms_client::{DeleteResponse, ExportFile};
use url::Url;

use sms_enhance::export::Downloads;
use sms_enhance::portal::Portal;

pub const LIST_URL: &str = "http://localhost:8000/students/?page=3&sort=name&order=desc";
pub const CSV: &[u8] = b"id,name\n1,Ada\n";

/// The student list page: an edit form, a search box, a sortable table,
/// an export button and a dashboard chart.
pub fn page() -> Document {
    Document::new(
        Element::new("body").id("body").child(
            Element::div()
                .id("container")
                .class("container")
                .child(
                    Element::form()
                        .id("student-form")
                        .attr("novalidate", "")
                        .child(
                            Element::div()
                                .id("group-student-id")
                                .class("mb-3")
                                .child(Element::input("student_id").id("student-id").required()),
                        )
                        .child(
                            Element::div()
                                .id("group-email")
                                .class("mb-3")
                                .child(Element::input("email").id("email")),
                        )
                        .child(
                            Element::div()
                                .id("group-cgpa")
                                .class("mb-3")
                                .child(Element::input("cgpa").id("cgpa")),
                        )
                        .child(
                            Element::div()
                                .id("group-department")
                                .class("mb-3")
                                .child(Element::select("department").id("department")),
                        )
                        .child(Element::button("Save").id("save").attr("type", "submit")),
                )
                .child(Element::input("search").id("search-box"))
                .child(
                    Element::new("table").id("students").child(
                        Element::new("tr")
                            .id("head-row")
                            .child(Element::new("th").id("th-name").attr("data-sort", "name").text("Name"))
                            .child(Element::new("th").id("th-cgpa").attr("data-sort", "cgpa").text("CGPA")),
                    ),
                )
                .child(Element::button("Export CSV").id("export").class("btn export-btn"))
                .child(Element::new("canvas").id("departmentChart")),
        ),
    )
}

pub fn dom() -> Dom {
    Dom::new(page())
}

pub fn list_url() -> Url {
    Url::parse(LIST_URL).unwrap()
}

/// IDs of the elements matching `selector` inside `scope`.
pub fn select_in(dom: &Dom, scope: &str, selector: &str) -> Vec<String> {
    let selector = Selector::parse(selector).unwrap();
    dom.read(|doc| doc.select_within(scope, &selector).unwrap())
}

/// Text of every banner in the page container, top first.
pub fn banner_texts(dom: &Dom) -> Vec<String> {
    let ids = select_in(dom, "container", ".alert");
    dom.read(|doc| ids.iter().map(|id| doc.get(id).unwrap().text_content()).collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behaviour {
    Succeed,
    Refuse,
    Fail,
}

/// In-memory server.
pub struct FakePortal {
    behaviour: Behaviour,
    latency: Option<std::time::Duration>,
    probe: Option<(Dom, String)>,
    pub calls: Mutex<Vec<String>>,
    pub button_during_export: Mutex<Option<Element>>,
}

impl FakePortal {
    pub fn new(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            latency: None,
            probe: None,
            calls: Mutex::new(Vec::new()),
            button_during_export: Mutex::new(None),
        }
    }

    /// Answer export requests only after `latency`.
    pub fn slow(mut self, latency: std::time::Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Snapshot `button` whenever an export request arrives.
    pub fn probing(mut self, dom: Dom, button: &str) -> Self {
        self.probe = Some((dom, button.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Portal for FakePortal {
    async fn export(&self, page: &Url) -> Result<ExportFile, ClientError> {
        self.calls.lock().unwrap().push(format!("export {page}"));
        if let Some((dom, button)) = &self.probe {
            *self.button_during_export.lock().unwrap() = dom.element(button);
        }
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        match self.behaviour {
            Behaviour::Succeed => Ok(ExportFile {
                content_type: Some("text/csv".to_string()),
                bytes: CSV.to_vec(),
            }),
            Behaviour::Refuse | Behaviour::Fail => Err(ApiError::http(500, "boom").into()),
        }
    }

    async fn delete_student(&self, student_id: u64) -> Result<DeleteResponse, ClientError> {
        self.calls.lock().unwrap().push(format!("delete {student_id}"));

        match self.behaviour {
            Behaviour::Succeed => Ok(DeleteResponse {
                success: true,
                message: "Student deleted successfully.".to_string(),
            }),
            Behaviour::Refuse => Ok(DeleteResponse {
                success: false,
                message: "Student has active enrollments.".to_string(),
            }),
            Behaviour::Fail => Err(ApiError::parse_with_body("expected value", "<html>").into()),
        }
    }
}

/// Downloads kept in memory.
#[derive(Default)]
pub struct MemoryDownloads {
    pub files: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemoryDownloads {
    pub fn files(&self) -> Vec<(String, Vec<u8>)> {
        self.files.lock().unwrap().clone()
    }
}

#[async_trait]
impl Downloads for MemoryDownloads {
    async fn save(&self, filename: &str, file: &ExportFile) -> std::io::Result<PathBuf> {
        self.files
            .lock()
            .unwrap()
            .push((filename.to_string(), file.bytes.clone()));
        Ok(PathBuf::from(filename))
    }
}

pub fn always(answer: bool) -> Arc<dyn sms_enhance::delete::Confirm> {
    Arc::new(move |_: &str| answer)
}
