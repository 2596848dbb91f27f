use std::cell::RefCell;
use std::rc::Rc;

use healthchat_api::HealthClient;
use healthchat_core::SymptomSession;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element};

use crate::dom;
use crate::markdown;
use crate::transport::FetchTransport;
use crate::utils::escape_html;

/// The symptom checker tab
#[derive(Clone)]
pub struct SymptomView {
    document: Document,
    session: Rc<RefCell<SymptomSession<FetchTransport>>>,
}

impl SymptomView {
    pub fn new(document: Document, client: HealthClient<FetchTransport>) -> Self {
        Self {
            document,
            session: Rc::new(RefCell::new(SymptomSession::new(client))),
        }
    }

    pub fn start(&self) -> Result<(), JsValue> {
        self.setup_add_form()?;
        self.setup_remove_buttons()?;
        self.setup_analyze_button()?;
        self.setup_reset_button()?;
        self.render()
    }

    fn setup_add_form(&self) -> Result<(), JsValue> {
        let form = dom::get_element_by_id(&self.document, "symptomForm")?;
        let view = self.clone();

        dom::add_listener(&form, "submit", move |event| {
            event.prevent_default();
            let input = match dom::get_input_by_id(&view.document, "symptomInput") {
                Ok(input) => input,
                Err(e) => {
                    log::error!("Symptom input missing: {:?}", e);
                    return;
                }
            };

            {
                let mut session = view.session.borrow_mut();
                session.set_draft(input.value());
                session.add_draft();
                input.set_value(session.draft());
            }
            view.render_or_log();
        })
    }

    /// One delegated listener for every pill's remove button
    fn setup_remove_buttons(&self) -> Result<(), JsValue> {
        let list = dom::get_element_by_id(&self.document, "symptomList")?;
        let view = self.clone();

        dom::add_listener(&list, "click", move |event| {
            let symptom = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|element| element.closest("[data-symptom]").ok().flatten())
                .and_then(|button| button.get_attribute("data-symptom"));

            if let Some(symptom) = symptom {
                view.session.borrow_mut().remove_symptom(&symptom);
                view.render_or_log();
            }
        })
    }

    fn setup_analyze_button(&self) -> Result<(), JsValue> {
        let button = dom::get_element_by_id(&self.document, "analyzeButton")?;
        let view = self.clone();

        dom::add_listener(&button, "click", move |_| view.analyze())
    }

    fn setup_reset_button(&self) -> Result<(), JsValue> {
        let button = dom::get_element_by_id(&self.document, "resetButton")?;
        let view = self.clone();

        dom::add_listener(&button, "click", move |_| {
            view.session.borrow_mut().reset();
            if let Ok(input) = dom::get_input_by_id(&view.document, "symptomInput") {
                input.set_value("");
            }
            view.render_or_log();
        })
    }

    fn analyze(&self) {
        let begun = self.session.borrow_mut().begin_analysis();
        let request = match begun {
            Ok(Some(request)) => request,
            Ok(None) => return,
            Err(e) => {
                log::info!("Analysis rejected: {}", e);
                self.render_or_log();
                return;
            }
        };
        self.render_or_log();

        let client = self.session.borrow().client().clone();
        let view = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = client.check_symptoms(&request).await;
            view.session.borrow_mut().finish_analysis(outcome);
            view.render_or_log();
        });
    }

    fn render_or_log(&self) {
        if let Err(e) = self.render() {
            log::error!("Failed to render symptom checker: {:?}", e);
        }
    }

    fn render(&self) -> Result<(), JsValue> {
        let session = self.session.borrow();
        let document = &self.document;

        let section = dom::get_html_element_by_id(document, "symptomSection")?;
        dom::set_visible(&section, !session.symptoms().is_empty());
        dom::get_element_by_id(document, "symptomCount")?
            .set_text_content(Some(&format!("Your Symptoms ({})", session.symptoms().len())));

        let list = dom::get_element_by_id(document, "symptomList")?;
        dom::clear_element(&list);
        for symptom in session.symptoms() {
            let pill = dom::create_element_with_class(document, "div", "symptom-pill")?;
            let escaped = escape_html(symptom);
            pill.set_inner_html(&format!(
                r#"<span class="symptom-text">{}</span><button type="button" class="remove-symptom" data-symptom="{}" aria-label="Remove">&times;</button>"#,
                escaped, escaped
            ));
            list.append_child(&pill)?;
        }

        let analyze = dom::get_button_by_id(document, "analyzeButton")?;
        analyze.set_disabled(!session.can_analyze());
        analyze.set_text_content(Some(if session.is_pending() {
            "Analyzing Your Symptoms..."
        } else {
            "Analyze Symptoms"
        }));

        let reset = dom::get_html_element_by_id(document, "resetButton")?;
        dom::set_visible(&reset, session.can_reset());

        let error_box = dom::get_html_element_by_id(document, "symptomError")?;
        match session.last_error() {
            Some(message) => {
                error_box.set_text_content(Some(message));
                dom::set_visible(&error_box, true);
            }
            None => dom::set_visible(&error_box, false),
        }

        let results = dom::get_html_element_by_id(document, "analysisSection")?;
        match session.result() {
            Some(result) => {
                dom::get_element_by_id(document, "analysisText")?
                    .set_inner_html(&markdown::render_markdown(&result.analysis_text));
                dom::get_element_by_id(document, "analysisDisclaimer")?
                    .set_text_content(Some(&result.disclaimer_text));
                dom::set_visible(&results, true);
            }
            None => dom::set_visible(&results, false),
        }

        Ok(())
    }
}
