//! Errors that can come out of request handling.

pub use failure::Error;
use failure_derive::Fail;
use kmrl_util::impl_from_for_error;
use kmrl_util::http::StatusCode;
use kmrl_fahrplan::FahrplanError;
use handlebars::RenderError;
use handlebars::Handlebars;
use rouille::{Response, Request};

use crate::tmpl::TemplateContext;

/// Error that could occur when processing a request.
#[derive(Fail, Debug)]
pub enum WebError {
    /// The given entity was not found.
    #[fail(display = "not found")]
    NotFound,
    /// The submitted form couldn't be read.
    #[fail(display = "bad form: {}", _0)]
    BadForm(String),
    /// A handler panicked while holding some app state.
    #[fail(display = "app state poisoned")]
    StatePoisoned,
    /// Error from kmrl-fahrplan.
    #[fail(display = "kmrl-fahrplan: {}", _0)]
    Fahrplan(FahrplanError),
    /// Handlebars rendering error.
    #[fail(display = "handlebars: {}", _0)]
    Hbs(RenderError),
}

impl WebError {
    /// Heading and explanation for errors the user can do something about.
    fn user_facing(&self) -> Option<(String, String)> {
        match *self {
            WebError::BadForm(ref reason) => {
                Some(("Bad request (400)".into(), reason.clone()))
            },
            WebError::Fahrplan(ref e) if e.status_code() < 500 => {
                Some((format!("Bad request ({})", e.status_code()), e.user_message()))
            },
            _ => None
        }
    }
    /// Renders the error page for this error.
    pub fn as_rendered(&self, req: &Request, hbs: &Handlebars) -> WebResult<Response> {
        use crate::templates::not_found::NotFoundView;
        use crate::templates::user_error::UserErrorView;

        let status = self.status_code();
        if let WebError::NotFound = *self {
            return TemplateContext {
                template: "not_found",
                title: "Not found".into(),
                body: NotFoundView {
                    uri: req.url()
                }
            }.render_status(hbs, status);
        }
        match self.user_facing() {
            Some((error_summary, reason)) => TemplateContext {
                template: "user_error",
                title: error_summary.clone().into(),
                body: UserErrorView { error_summary, reason }
            }.render_status(hbs, status),
            None => TemplateContext::title("ise", "Internal error").render_status(hbs, status)
        }
    }
}
impl StatusCode for WebError {
    fn status_code(&self) -> u16 {
        use self::WebError::*;

        match *self {
            NotFound => 404,
            BadForm(_) => 400,
            Fahrplan(ref e) => e.status_code(),
            _ => 500
        }
    }
}

impl_from_for_error!(WebError,
                     FahrplanError => Fahrplan,
                     RenderError => Hbs);

pub type WebResult<T> = ::std::result::Result<T, WebError>;
pub type Result<T, E = Error> = ::std::result::Result<T, E>;
