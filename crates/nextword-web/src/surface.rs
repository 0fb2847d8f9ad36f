use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use nextword_engine::{CanvasSize, CloudScene, Surface, WordElement, WordId};

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Glow applied to every word. Blurred copy merged under the sharp glyphs.
const NEON_GLOW: &str = r#"<filter id="neonGlow" x="-50%" y="-50%" width="200%" height="200%">
  <feGaussianBlur in="SourceGraphic" stdDeviation="4" result="blur"/>
  <feMerge>
    <feMergeNode in="blur"/>
    <feMergeNode in="SourceGraphic"/>
  </feMerge>
</filter>"#;

fn create_svg_element(document: &Document, tag: &str) -> Result<Element, JsValue> {
    document.create_element_ns(Some(SVG_NS), tag)
}

/// Draws the cloud as SVG `<text>` nodes inside a centred group.
pub struct SvgSurface {
    document: Document,
    svg: Element,
    group: Element,
    font_family: String,
    nodes: Vec<(WordId, Element)>,
}

impl SvgSurface {
    /// Create the `<svg>` root under `container`.
    pub fn new(document: &Document, container: &Element, font_family: &str) -> Result<Self, JsValue> {
        let svg = create_svg_element(document, "svg")?;
        svg.set_attribute("xmlns", SVG_NS)?;
        svg.set_attribute("width", "100%")?;
        svg.set_attribute("height", "100%")?;
        svg.set_attribute("preserveAspectRatio", "xMidYMid meet")?;
        svg.set_attribute("style", "border-radius: 12px; display: block;")?;

        let defs = create_svg_element(document, "defs")?;
        defs.set_inner_html(NEON_GLOW);
        svg.append_child(&defs)?;

        let group = create_svg_element(document, "g")?;
        svg.append_child(&group)?;
        container.append_child(&svg)?;

        Ok(Self {
            document: document.clone(),
            svg,
            group,
            font_family: font_family.to_string(),
            nodes: Vec::new(),
        })
    }

    fn text_node(&self, element: &WordElement) -> Result<Element, JsValue> {
        let text = create_svg_element(&self.document, "text")?;
        text.set_attribute("text-anchor", "middle")?;
        text.set_attribute("dominant-baseline", "central")?;
        text.set_attribute("transform", &element.transform())?;
        text.set_attribute("style", &self.text_style(element))?;
        text.set_text_content(Some(&element.text));
        Ok(text)
    }

    fn text_style(&self, element: &WordElement) -> String {
        format!(
            "font-family: {}; font-size: {}px; opacity: {}; fill: {}; filter: url(#neonGlow);",
            self.font_family,
            element.font_size,
            element.opacity,
            element.fill.to_css()
        )
    }
}

impl Surface for SvgSurface {
    type Error = JsValue;

    fn clear(&mut self) -> Result<(), JsValue> {
        self.group.set_inner_html("");
        self.nodes.clear();
        Ok(())
    }

    fn mount(&mut self, scene: &CloudScene, canvas: CanvasSize) -> Result<(), JsValue> {
        self.clear()?;
        self.svg.set_attribute("viewBox", &canvas.view_box())?;
        let center = canvas.half();
        self.group
            .set_attribute("transform", &format!("translate({}, {})", center.x, center.y))?;

        for element in scene.iter() {
            let node = self.text_node(element)?;
            self.group.append_child(&node)?;
            self.nodes.push((element.id, node));
        }
        Ok(())
    }

    fn update(&mut self, element: &WordElement) -> Result<(), JsValue> {
        let Some((_, node)) = self.nodes.iter().find(|(id, _)| *id == element.id) else {
            log::debug!("svg: no node for {:?}", element.id);
            return Ok(());
        };
        node.set_attribute("style", &self.text_style(element))
    }
}
