use std::sync::Arc;

use axum::response::Html;
use coachdesk_application::{GateState, WorkbenchView};
use coachdesk_core::{AppError, AppResult};
use minijinja::{Environment, context};

const TEMPLATES: [(&str, &str); 5] = [
    ("base.html", include_str!("../templates/base.html")),
    ("login.html", include_str!("../templates/login.html")),
    ("dashboard.html", include_str!("../templates/dashboard.html")),
    ("list.html", include_str!("../templates/list.html")),
    ("form.html", include_str!("../templates/form.html")),
];

/// Compiled page templates. `.html` names are auto-escaped.
#[derive(Clone)]
pub struct Templates {
    environment: Arc<Environment<'static>>,
}

impl Templates {
    pub fn new() -> AppResult<Self> {
        let mut environment = Environment::new();
        for (name, source) in TEMPLATES {
            environment.add_template(name, source).map_err(|error| {
                AppError::Internal(format!("failed to compile template '{name}': {error}"))
            })?;
        }

        Ok(Self {
            environment: Arc::new(environment),
        })
    }

    pub fn login_page(&self, gate: &GateState) -> AppResult<Html<String>> {
        let login_error = match gate {
            GateState::Unauthenticated { login_error } => login_error.as_deref(),
            GateState::Authenticated(_) => None,
        };
        self.render("login.html", context! { login_error })
    }

    pub fn dashboard_page(&self, view: &WorkbenchView) -> AppResult<Html<String>> {
        self.render("dashboard.html", context! { view })
    }

    fn render(&self, name: &str, context: minijinja::Value) -> AppResult<Html<String>> {
        self.environment
            .get_template(name)
            .and_then(|template| template.render(context))
            .map(Html)
            .map_err(|error| {
                AppError::Internal(format!("failed to render template '{name}': {error}"))
            })
    }
}

#[cfg(test)]
mod tests {
    use coachdesk_application::GateState;

    use super::Templates;

    #[test]
    fn login_page_escapes_backend_message() {
        let templates = Templates::new().unwrap_or_else(|_| unreachable!());
        let page = templates
            .login_page(&GateState::Unauthenticated {
                login_error: Some("<b>Invalid login credentials</b>".to_owned()),
            })
            .map(|html| html.0)
            .unwrap_or_default();

        assert!(page.contains("&lt;b&gt;Invalid login credentials&lt;/b&gt;"));
        assert!(page.contains("action=\"/auth/login\""));
    }
}
