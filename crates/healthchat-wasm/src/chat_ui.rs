use std::cell::RefCell;
use std::rc::Rc;

use healthchat_api::HealthClient;
use healthchat_core::{ConversationStore, STORAGE_KEY};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, KeyboardEvent};

use crate::dom;
use crate::markdown;
use crate::storage::LocalStorageStore;
use crate::transport::FetchTransport;

type Store = ConversationStore<FetchTransport, LocalStorageStore>;

/// The chat tab: renders the conversation and feeds input into the store
#[derive(Clone)]
pub struct ChatView {
    document: Document,
    store: Rc<RefCell<Store>>,
}

impl ChatView {
    pub fn new(document: Document, client: HealthClient<FetchTransport>) -> Result<Self, JsValue> {
        let storage = LocalStorageStore::new()?;
        let store = ConversationStore::open(client, storage, STORAGE_KEY);

        Ok(Self {
            document,
            store: Rc::new(RefCell::new(store)),
        })
    }

    pub fn start(&self) -> Result<(), JsValue> {
        self.setup_message_form()?;
        self.setup_enter_key()?;
        self.setup_clear_button()?;
        self.render()
    }

    fn setup_message_form(&self) -> Result<(), JsValue> {
        let form = dom::get_element_by_id(&self.document, "chatForm")?;
        let view = self.clone();

        dom::add_listener(&form, "submit", move |event| {
            event.prevent_default();
            view.submit();
        })
    }

    fn setup_enter_key(&self) -> Result<(), JsValue> {
        let input = dom::get_element_by_id(&self.document, "messageInput")?;
        let view = self.clone();

        // Enter sends, Shift+Enter inserts a newline
        dom::add_listener(&input, "keydown", move |event| {
            if let Some(key_event) = event.dyn_ref::<KeyboardEvent>() {
                if key_event.key() == "Enter" && !key_event.shift_key() {
                    event.prevent_default();
                    view.submit();
                }
            }
        })
    }

    fn setup_clear_button(&self) -> Result<(), JsValue> {
        let button = dom::get_element_by_id(&self.document, "clearHistoryButton")?;
        let view = self.clone();

        dom::add_listener(&button, "click", move |_| {
            let window = match crate::window() {
                Ok(window) => window,
                Err(e) => {
                    log::error!("Cannot ask for confirmation: {:?}", e);
                    return;
                }
            };
            let cleared = view
                .store
                .borrow_mut()
                .clear_history(|prompt| window.confirm_with_message(prompt).unwrap_or(false));
            if cleared {
                log::info!("Chat history cleared");
                view.render_or_log();
            }
        })
    }

    fn submit(&self) {
        let input = match dom::get_textarea_by_id(&self.document, "messageInput") {
            Ok(input) => input,
            Err(e) => {
                log::error!("Message input missing: {:?}", e);
                return;
            }
        };

        let exchange = self.store.borrow_mut().begin_send(&input.value());
        let Some(exchange) = exchange else {
            return;
        };
        input.set_value("");
        self.render_or_log();

        let client = self.store.borrow().client().clone();
        let view = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = client.chat(&exchange.request).await;
            view.store.borrow_mut().finish_send(result);
            view.render_or_log();
        });
    }

    fn render_or_log(&self) {
        if let Err(e) = self.render() {
            log::error!("Failed to render chat: {:?}", e);
        }
    }

    fn render(&self) -> Result<(), JsValue> {
        let store = self.store.borrow();
        let document = &self.document;

        let list = dom::get_element_by_id(document, "messageList")?;
        dom::clear_element(&list);

        for turn in store.turns() {
            let wrapper = dom::create_element_with_class(document, "div", &format!("message-wrapper {}", turn.role))?;
            let body = dom::create_element_with_class(document, "div", &format!("message {}", turn.role))?;
            let text = dom::create_element_with_class(document, "div", "message-text")?;
            text.set_inner_html(&markdown::render_turn_content(turn));
            body.append_child(&text)?;
            wrapper.append_child(&body)?;
            list.append_child(&wrapper)?;
        }

        if store.is_pending() {
            let loading = dom::create_element_with_class(document, "div", "loading-message")?;
            loading.set_inner_html(
                r#"<div class="loading-dots"><span class="loading-dot"></span><span class="loading-dot"></span><span class="loading-dot"></span></div>"#,
            );
            list.append_child(&loading)?;
        }

        let error_box = dom::get_html_element_by_id(document, "chatError")?;
        match store.last_error() {
            Some(message) => {
                error_box.set_text_content(Some(message));
                dom::set_visible(&error_box, true);
            }
            None => dom::set_visible(&error_box, false),
        }

        dom::get_button_by_id(document, "sendButton")?.set_disabled(store.is_pending());
        dom::get_textarea_by_id(document, "messageInput")?.set_disabled(store.is_pending());

        dom::scroll_to_bottom(&dom::get_element_by_id(document, "chatMessages")?);
        Ok(())
    }
}
