//! Templating engine stuff.

use std::borrow::Cow;
use handlebars::Handlebars;
use rouille::Response;
use serde_derive::Serialize;
use log::*;

use crate::errors::*;

#[derive(Serialize)]
pub struct TemplateContext<'a, T> where T: serde::Serialize {
    pub template: &'static str,
    pub title: Cow<'a, str>,
    pub body: T
}
impl<'a, T> TemplateContext<'a, T> where T: serde::Serialize {
    pub fn render(self, hbs: &Handlebars) -> WebResult<Response> {
        match hbs.render(self.template, &self) {
            Ok(d) => Ok(Response::html(d)),
            Err(e) => {
                warn!("Failed to render template: {}", e);
                Err(e)?
            }
        }
    }
    /// Renders, then sets the response's status code.
    pub fn render_status(self, hbs: &Handlebars, status: u16) -> WebResult<Response> {
        Ok(self.render(hbs)?.with_status_code(status))
    }
}
impl<'a> TemplateContext<'a, ()> {
    pub fn title<U: Into<Cow<'a, str>>>(template: &'static str, title: U) -> Self {
        TemplateContext {
            template,
            title: title.into(),
            body: ()
        }
    }
}
struct Partial {
    name: &'static str,
    content: &'static str
}
macro_rules! partial {
    ($name:expr) => {
        Partial {
            name: $name,
            content: include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/", $name, ".html.hbs"))
        }
    }
}

static PARTIALS: [Partial; 13] = [
    partial!("constraint_forms"),
    partial!("constraints"),
    partial!("dashboard"),
    partial!("footer"),
    partial!("header"),
    partial!("ise"),
    partial!("nav"),
    partial!("not_found"),
    partial!("notification"),
    partial!("schedule_forms"),
    partial!("schedule_table"),
    partial!("schedules"),
    partial!("user_error")
];
pub fn handlebars_init() -> Result<Handlebars> {
    let mut hbs = Handlebars::new();
    hbs.set_strict_mode(true);
    for partial in PARTIALS.iter() {
        hbs.register_partial(partial.name, partial.content)?;
    }
    Ok(hbs)
}
