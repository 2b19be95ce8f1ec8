//! Walks through the student form: a blocked submit, a fix, a clean submit.
//!
//! Run with `cargo run -p sms-enhance --example student_form`. Logs go to
//! `student_form.log`.

use std::fs::File;
use std::sync::Arc;
use std::time::Duration;

use simplelog::{Config, LevelFilter, WriteLogger};
use sms_client::PortalClient;
use sms_client::cookie::StaticCookies;
use sms_enhance::charts;
use sms_enhance::prelude::*;
use url::Url;

fn page() -> Document {
    Document::new(
        Element::new("body").id("body").child(
            Element::div().id("container").class("container").child(
                Element::form()
                    .id("student-form")
                    .attr("novalidate", "")
                    .child(
                        Element::div()
                            .id("group-student-id")
                            .child(Element::input("student_id").id("student-id").required()),
                    )
                    .child(
                        Element::div()
                            .id("group-email")
                            .child(Element::input("email").id("email").required()),
                    )
                    .child(Element::div().id("group-cgpa").child(Element::input("cgpa").id("cgpa")))
                    .child(Element::div().id("group-phone").child(Element::input("phone").id("phone"))),
            ),
        ),
    )
}

fn show(dom: &Dom) {
    dom.read(|doc| {
        let Ok(alerts) = doc.query_all(".alert, .invalid-feedback") else {
            return;
        };
        for id in alerts {
            if let Some(el) = doc.get(&id) {
                println!("  [{}] {}", el.class_name(), el.text_content());
            }
        }
    });
}

#[tokio::main]
async fn main() {
    let log_file = File::create("student_form.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let base = Url::parse("http://localhost:8000/").expect("valid base URL");
    let client = PortalClient::builder()
        .url(base.clone())
        .cookies(StaticCookies::new("csrftoken=demo"))
        .timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to build client");

    let config = EnhanceConfig::default().with_download_dir(std::env::temp_dir());
    let services = Services {
        navigator: Arc::new(MemoryNavigator::new(base.join("students/").expect("valid list URL"))),
        portal: Arc::new(client),
        downloads: Arc::new(DirectoryDownloads::from_config(&config)),
        confirm: Arc::new(|prompt: &str| {
            println!("{prompt} [y]");
            true
        }),
    };

    let dom = Dom::new(page());
    let mut page = match Enhancer::attach(dom.clone(), services, config) {
        Ok(page) => page,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    println!("Submitting an empty form:");
    let outcome = page.dispatch(&Event::submit("student-form"));
    println!("  submission cancelled: {}", outcome.is_default_prevented());
    show(&dom);

    println!("\nFixing the fields:");
    for (id, value) in [
        ("student-id", "S-2024-001"),
        ("email", "ada@uni.edu"),
        ("cgpa", "3.85"),
        ("phone", "5550102030"),
    ] {
        if let Err(e) = page.type_into(id, value) {
            eprintln!("Error: {}", e);
            return;
        }
        page.dispatch(&Event::blur(id));
    }

    let outcome = page.dispatch(&Event::submit("student-form"));
    println!("  submission cancelled: {}", outcome.is_default_prevented());
    println!("  phone shown as {}", format_phone("5550102030"));
    if let Some(date) = format_date("2024-09-01") {
        println!("  enrolled {date}");
    }

    match charts::department_chart() {
        Ok(chart) => println!("\n{}: {}", charts::DEPARTMENT_CHART, chart.to_json()),
        Err(e) => eprintln!("Error: {}", e),
    }
}
