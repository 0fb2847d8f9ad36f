//! Page scaffolding: the black full-height layout, the revealed-text panel and
//! the start/restart button.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement};

use nextword_engine::AppView;

/// Last word of the text panel plays this once: red, then pale, then white.
const FADE_STYLE: &str = r#"
.redFade {
  animation: redToWhite 1.4s forwards;
}
@keyframes redToWhite {
  0%   { color: red;   }
  50%  { color: #faa;  }
  100% { color: white; }
}
"#;

const ROOT_STYLE: &str = "background: #000; color: #fff; height: 100vh; overflow: hidden; \
     display: flex; flex-direction: column; justify-content: space-between; \
     padding: 10px; box-sizing: border-box;";

const CLOUD_STYLE: &str =
    "flex: 1; display: flex; justify-content: center; align-items: center; width: 100%;";

const TEXT_STYLE: &str =
    "font-size: clamp(16px, 2vw, 24px); font-family: 'Courier New'; white-space: pre-wrap;";

const BUTTON_STYLE: &str = "padding: 10px 20px; font-size: clamp(12px, 1.5vw, 16px); \
     cursor: pointer; border-radius: 8px; background: #fff; color: #000; border: none;";

fn styled(document: &Document, tag: &str, style: &str) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    el.set_attribute("style", style)?;
    Ok(el)
}

/// Handles to the page elements the runner updates.
pub struct Page {
    document: Document,
    /// Where the SVG cloud is mounted.
    pub cloud: Element,
    text: Element,
    pub button: HtmlButtonElement,
}

impl Page {
    /// Build the layout inside `body`.
    pub fn build(document: &Document) -> Result<Self, JsValue> {
        let body: HtmlElement = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        body.set_attribute("style", "margin: 0; background: #000;")?;

        let style = document.create_element("style")?;
        style.set_text_content(Some(FADE_STYLE));
        body.append_child(&style)?;

        let root = styled(document, "div", ROOT_STYLE)?;
        let cloud = styled(document, "div", CLOUD_STYLE)?;
        root.append_child(&cloud)?;

        let text_row = styled(document, "div", "text-align: center; margin-top: 10px;")?;
        let text = styled(document, "p", TEXT_STYLE)?;
        text_row.append_child(&text)?;
        root.append_child(&text_row)?;

        let button_row = styled(document, "div", "text-align: center;")?;
        let button: HtmlButtonElement = styled(document, "button", BUTTON_STYLE)?.dyn_into()?;
        button_row.append_child(&button)?;
        root.append_child(&button_row)?;

        body.append_child(&root)?;

        Ok(Self {
            document: document.clone(),
            cloud,
            text,
            button,
        })
    }

    /// Redraw the text panel and button from a view snapshot.
    pub fn render(&self, view: &AppView) -> Result<(), JsValue> {
        self.text.set_inner_html("");
        for (i, word) in view.words.iter().enumerate() {
            let margin = if i == 0 { "0px" } else { "8px" };
            let span = styled(
                &self.document,
                "span",
                &format!("display: inline-block; margin-left: {};", margin),
            )?;
            if view.fresh_index == Some(i) && !word.is_empty() {
                span.set_class_name("redFade");
            }
            span.set_text_content(Some(word));
            self.text.append_child(&span)?;
        }

        match view.control {
            Some(control) => {
                self.button.set_text_content(Some(control.label));
                self.button.set_hidden(false);
            }
            None => self.button.set_hidden(true),
        }
        Ok(())
    }
}
