use glam::Vec2;
use sidescroll::{Color, ImageId, ImageRegistry, Rect, Surface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

/// `Surface` backed by a page canvas and its 2D context.
///
/// Images are requested from the browser as soon as they are registered and
/// drawn only once they have decoded; until then draws are dropped.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Indexed by `ImageId`. `None` where the element could not be created.
    images: Vec<Option<HtmlImageElement>>,
}

impl CanvasSurface {
    /// Look up the first element matching `selector` and take its 2D context.
    pub fn from_document(selector: &str) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas = document
            .query_selector(selector)?
            .ok_or_else(|| JsValue::from_str(&format!("no element matches '{}'", selector)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("'{}' is not a canvas", selector)))?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("unexpected 2d context type"))?;

        Ok(Self {
            canvas,
            ctx,
            images: Vec::new(),
        })
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }

    /// Start loading every image in `registry`, replacing any earlier set.
    pub fn load_images(&mut self, registry: &ImageRegistry) {
        self.images = registry
            .iter()
            .map(|(id, path)| match HtmlImageElement::new() {
                Ok(img) => {
                    img.set_src(path);
                    log::debug!("loading image {} from {}", id.0, path);
                    Some(img)
                }
                Err(err) => {
                    log::warn!("could not create image element for {}: {:?}", path, err);
                    None
                }
            })
            .collect();
    }

    fn ready_image(&self, id: ImageId) -> Option<&HtmlImageElement> {
        self.images
            .get(id.0 as usize)?
            .as_ref()
            .filter(|img| img.complete() && img.natural_width() > 0)
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ctx.clear_rect(
            rect.x as f64,
            rect.y as f64,
            rect.width as f64,
            rect.height as f64,
        );
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(
            rect.x as f64,
            rect.y as f64,
            rect.width as f64,
            rect.height as f64,
        );
    }

    fn draw_image(&mut self, image: ImageId, target: Rect) {
        let Some(img) = self.ready_image(image) else {
            return;
        };
        // A broken image can still throw here; skip the draw like a pending one.
        if let Err(err) = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            img,
            target.x as f64,
            target.y as f64,
            target.width as f64,
            target.height as f64,
        ) {
            log::debug!("draw of image {} failed: {:?}", image.0, err);
        }
    }
}
