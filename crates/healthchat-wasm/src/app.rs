use healthchat_api::HealthClient;
use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::chat_ui::ChatView;
use crate::dom;
use crate::symptom_ui::SymptomView;
use crate::transport::FetchTransport;
use crate::utils;

const CHAT_TAB: (&str, &str) = ("chatTab", "chatPanel");
const SYMPTOM_TAB: (&str, &str) = ("symptomTab", "symptomPanel");

/// Page root: two independent views behind a tab bar
pub struct HealthApp {
    document: Document,
    chat: ChatView,
    symptoms: SymptomView,
}

impl HealthApp {
    pub fn new() -> Result<Self, JsValue> {
        let document = crate::document()?;
        let client = HealthClient::new(FetchTransport::new(&utils::api_base_url()));

        Ok(Self {
            chat: ChatView::new(document.clone(), client.clone())?,
            symptoms: SymptomView::new(document.clone(), client),
            document,
        })
    }

    pub fn start(self) -> Result<(), JsValue> {
        self.chat.start()?;
        self.symptoms.start()?;
        self.setup_tabs()?;
        show_tab(&self.document, CHAT_TAB, SYMPTOM_TAB)
    }

    fn setup_tabs(&self) -> Result<(), JsValue> {
        for (active, inactive) in [(CHAT_TAB, SYMPTOM_TAB), (SYMPTOM_TAB, CHAT_TAB)] {
            let button = dom::get_element_by_id(&self.document, active.0)?;
            let document = self.document.clone();
            dom::add_listener(&button, "click", move |_| {
                if let Err(e) = show_tab(&document, active, inactive) {
                    log::error!("Failed to switch tab: {:?}", e);
                }
            })?;
        }
        Ok(())
    }
}

fn show_tab(document: &Document, active: (&str, &str), inactive: (&str, &str)) -> Result<(), JsValue> {
    dom::get_element_by_id(document, active.0)?.set_class_name("tab-button active");
    dom::get_element_by_id(document, inactive.0)?.set_class_name("tab-button");
    dom::set_visible(&dom::get_html_element_by_id(document, active.1)?, true);
    dom::set_visible(&dom::get_html_element_by_id(document, inactive.1)?, false);
    Ok(())
}
