//! PDF Document wrapper

use crate::font::{BuiltinFont, Font, FontData};
use crate::graphics::{
    generate_fill_rect_operators, generate_line_operators, generate_rect_operators, Color,
};
use crate::image::{
    calculate_scaled_dimensions, generate_image_operators, generate_watermark_operators,
    ImageScaleMode, ImageXObject,
};
use crate::text::{encode_win_ansi, generate_text_operators, EncodedText, TextRenderContext};
use crate::{Align, PdfError, Result, A4_HEIGHT, A4_WIDTH};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// PDF Document wrapper providing high-level operations
///
/// Content is buffered per page and flushed once at save time; font
/// resources are finalized at save time as well, after every insert is
/// known.
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Registered TrueType fonts (name -> font data)
    embedded_fonts: HashMap<String, FontData>,
    /// Current font
    current_font: Font,
    /// Current font size
    current_font_size: f32,
    /// Current text color
    current_text_color: Color,
    /// Page font resources (page number -> font key -> resource name)
    page_font_resources: HashMap<usize, HashMap<String, String>>,
    /// Next font resource number
    next_font_resource: u32,
    /// Embedded images (data hash -> PDF object ID)
    embedded_images: HashMap<u64, ObjectId>,
    /// Page image resources (page number -> resource name -> object ID)
    page_image_resources: HashMap<usize, HashMap<String, ObjectId>>,
    /// Next image resource number
    next_image_resource: u32,
    /// Next transparency graphics-state resource number
    next_gstate: u32,
    /// Buffered content operators per page
    page_content_buffer: HashMap<usize, Vec<u8>>,
}

impl PdfDocument {
    fn from_inner(inner: Document) -> Self {
        Self {
            inner,
            embedded_fonts: HashMap::new(),
            current_font: Font::Builtin(BuiltinFont::Helvetica),
            current_font_size: 10.0,
            current_text_color: Color::black(),
            page_font_resources: HashMap::new(),
            next_font_resource: 1,
            embedded_images: HashMap::new(),
            page_image_resources: HashMap::new(),
            next_image_resource: 1,
            next_gstate: 1,
            page_content_buffer: HashMap::new(),
        }
    }

    /// Create a new document with a single blank A4 page
    /// (595.28 x 841.89 points).
    pub fn new_a4() -> Self {
        let mut doc = Document::with_version("1.5");

        let pages_id = doc.new_object_id();
        let contents_id = doc.add_object(Object::Stream(Stream::new(dictionary! {}, vec![])));

        let page_id = doc.add_object(Object::Dictionary(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), A4_WIDTH.into(), A4_HEIGHT.into()],
            "Resources" => dictionary! {},
            "Contents" => contents_id,
        }));

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Count" => 1,
                "Kids" => vec![page_id.into()],
            }),
        );

        let catalog_id = doc.add_object(Object::Dictionary(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        }));
        doc.trailer.set("Root", catalog_id);

        Self::from_inner(doc)
    }

    /// Open a PDF document from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let inner = Document::load(path).map_err(|e| PdfError::OpenError(e.to_string()))?;
        Ok(Self::from_inner(inner))
    }

    /// Open a PDF document from bytes
    pub fn open_from_bytes(data: &[u8]) -> Result<Self> {
        let inner = Document::load_mem(data).map_err(|e| PdfError::OpenError(e.to_string()))?;
        Ok(Self::from_inner(inner))
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.inner.get_pages().len()
    }

    /// Register a TrueType font under a name
    ///
    /// # Arguments
    /// * `name` - Font identifier (used with `Font::Embedded`)
    /// * `ttf_data` - TrueType font file bytes
    pub fn register_font(&mut self, name: &str, ttf_data: &[u8]) -> Result<()> {
        if self.embedded_fonts.contains_key(name) {
            return Err(PdfError::FontAlreadyExists(name.to_string()));
        }

        let font_data = FontData::from_ttf(name, ttf_data)?;
        self.embedded_fonts.insert(name.to_string(), font_data);
        Ok(())
    }

    /// Set the current font and size
    pub fn set_font(&mut self, font: Font, size: f32) -> Result<()> {
        if let Font::Embedded(ref name) = font {
            if !self.embedded_fonts.contains_key(name) {
                return Err(PdfError::FontNotFound(name.clone()));
            }
        }

        self.current_font = font;
        self.current_font_size = size;
        Ok(())
    }

    /// Set the text color
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    /// Check whether a font covers a character.
    ///
    /// Built-in fonts are reported as covering printable ASCII only, which
    /// is exactly the subset the WinAnsi literal encoder passes through.
    pub fn font_has_glyph(&self, font: &Font, c: char) -> bool {
        match font {
            Font::Builtin(_) => (' '..='~').contains(&c),
            Font::Embedded(name) => self
                .embedded_fonts
                .get(name)
                .map(|f| f.has_glyph(c))
                .unwrap_or(false),
        }
    }

    /// Measure text width in points with the current font and size
    pub fn text_width(&self, text: &str) -> Result<f64> {
        match &self.current_font {
            Font::Builtin(builtin) => {
                Ok(builtin.text_width_points(text, self.current_font_size))
            }
            Font::Embedded(name) => {
                let font = self
                    .embedded_fonts
                    .get(name)
                    .ok_or_else(|| PdfError::FontNotFound(name.clone()))?;
                Ok(font.text_width_points(text, self.current_font_size))
            }
        }
    }

    /// Insert text at a specific position
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points
    /// * `y` - Y coordinate in points (from top)
    /// * `align` - Text alignment relative to `x`
    pub fn insert_text(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }

        // Nothing to render
        if text.is_empty() {
            return Ok(());
        }

        let text_width = self.text_width(text)?;
        let page_height = self.get_page_height(page)?;
        let pdf_y = page_height - y;

        let start_x = match align {
            Align::Left => x,
            Align::Center => x - (text_width / 2.0),
            Align::Right => x - text_width,
        };

        let font_key = self.current_font_key();
        let resource_name = self.get_or_create_font_ref(&font_key, page);

        let encoded = match self.current_font.clone() {
            Font::Builtin(_) => EncodedText::Literal(encode_win_ansi(text)),
            Font::Embedded(name) => {
                let font = self
                    .embedded_fonts
                    .get_mut(&name)
                    .ok_or_else(|| PdfError::FontNotFound(name.clone()))?;
                font.add_chars(text);
                EncodedText::Hex(font.encode_text_hex(text))
            }
        };

        let ctx = TextRenderContext {
            font_name: resource_name,
            font_size: self.current_font_size,
            color: self.current_text_color,
        };
        let operators = generate_text_operators(&encoded, start_x, pdf_y, &ctx);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Draw a stroked line between two points (top-origin coordinates)
    pub fn draw_line(
        &mut self,
        page: usize,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: f64,
    ) -> Result<()> {
        let page_height = self.get_page_height(page)?;
        let operators = generate_line_operators(
            x1,
            page_height - y1,
            x2,
            page_height - y2,
            width,
            Color::black(),
        );
        self.buffer_content(page, &operators);
        Ok(())
    }

    /// Draw a stroked rectangle; `x`/`y` name the top-left corner
    /// (top-origin coordinates)
    pub fn draw_rect(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        line_width: f64,
    ) -> Result<()> {
        let page_height = self.get_page_height(page)?;
        let operators =
            generate_rect_operators(x, page_height - y - h, w, h, line_width, Color::black());
        self.buffer_content(page, &operators);
        Ok(())
    }

    /// Fill a rectangle; `x`/`y` name the top-left corner
    /// (top-origin coordinates)
    pub fn fill_rect(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Color,
    ) -> Result<()> {
        let page_height = self.get_page_height(page)?;
        let operators = generate_fill_rect_operators(x, page_height - y - h, w, h, color);
        self.buffer_content(page, &operators);
        Ok(())
    }

    /// Insert an image at a specific position
    ///
    /// # Arguments
    /// * `data` - Image file bytes (JPEG or PNG)
    /// * `page` - Page number (1-indexed)
    /// * `x`, `y` - Top-left corner in points (from top)
    /// * `width`, `height` - Display size in points
    pub fn insert_image(
        &mut self,
        data: &[u8],
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<()> {
        self.insert_image_scaled(data, page, x, y, width, height, ImageScaleMode::Stretch)
    }

    /// Insert an image with a scaling mode
    #[allow(clippy::too_many_arguments)]
    pub fn insert_image_scaled(
        &mut self,
        data: &[u8],
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        mode: ImageScaleMode,
    ) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }

        let (image_resource_name, orig_width, orig_height) =
            self.get_or_create_image_ref(data, page)?;

        let (actual_width, actual_height) =
            calculate_scaled_dimensions(orig_width, orig_height, width, height, mode);

        let page_height = self.get_page_height(page)?;
        let pdf_y = page_height - y - actual_height;

        let operators =
            generate_image_operators(&image_resource_name, x, pdf_y, actual_width, actual_height);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Insert a centered low-opacity watermark image.
    ///
    /// The image is drawn at the point of call, so callers wanting it under
    /// all other content draw it first. Proportionally scaled to `width`.
    pub fn insert_watermark(
        &mut self,
        data: &[u8],
        page: usize,
        width: f64,
        alpha: f64,
    ) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }

        let (image_resource_name, orig_width, orig_height) =
            self.get_or_create_image_ref(data, page)?;

        let (actual_width, actual_height) = calculate_scaled_dimensions(
            orig_width,
            orig_height,
            width,
            width,
            ImageScaleMode::FitWidth,
        );

        let gs_name = self.create_opacity_gstate(page, alpha)?;

        let page_height = self.get_page_height(page)?;
        let page_width = self.get_page_width(page)?;
        let x = (page_width - actual_width) / 2.0;
        let pdf_y = (page_height - actual_height) / 2.0;

        let operators = generate_watermark_operators(
            &image_resource_name,
            &gs_name,
            x,
            pdf_y,
            actual_width,
            actual_height,
        );
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Save the document to a file
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.finalize()?;
        self.inner
            .save(path)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(())
    }

    /// Save the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.finalize()?;

        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        Ok(buffer)
    }

    /// Flush buffered content and finalize font resources
    fn finalize(&mut self) -> Result<()> {
        self.flush_content_buffers()?;
        self.embed_fonts()?;
        Ok(())
    }

    /// Resource key of the current font
    fn current_font_key(&self) -> String {
        match &self.current_font {
            Font::Builtin(builtin) => builtin.base_name().to_string(),
            Font::Embedded(name) => name.clone(),
        }
    }

    /// Get or create a font resource name for a page
    fn get_or_create_font_ref(&mut self, font_key: &str, page: usize) -> String {
        let page_resources = self.page_font_resources.entry(page).or_default();

        if let Some(resource_name) = page_resources.get(font_key) {
            return resource_name.clone();
        }

        let resource_name = format!("F{}", self.next_font_resource);
        self.next_font_resource += 1;
        page_resources.insert(font_key.to_string(), resource_name.clone());

        resource_name
    }

    /// Embed every used font and write references into page resources
    fn embed_fonts(&mut self) -> Result<()> {
        // Collect distinct font keys across pages
        let mut font_keys: Vec<String> = self
            .page_font_resources
            .values()
            .flat_map(|fonts| fonts.keys().cloned())
            .collect();
        font_keys.sort();
        font_keys.dedup();

        let mut font_object_ids: HashMap<String, ObjectId> = HashMap::new();
        for key in font_keys {
            let object_id = if let Some(font_data) = self.embedded_fonts.get(&key) {
                let font_data = font_data.clone();
                self.embed_font_object(&font_data)?
            } else {
                let builtin = builtin_by_base_name(&key)
                    .ok_or_else(|| PdfError::FontNotFound(key.clone()))?;
                self.inner
                    .add_object(Object::Dictionary(builtin.to_pdf_dictionary()))
            };
            font_object_ids.insert(key, object_id);
        }

        let page_resources: Vec<(usize, Vec<(String, String)>)> = self
            .page_font_resources
            .iter()
            .map(|(&page, fonts)| {
                let list = fonts
                    .iter()
                    .map(|(key, resource)| (key.clone(), resource.clone()))
                    .collect();
                (page, list)
            })
            .collect();

        for (page, fonts) in page_resources {
            if fonts.is_empty() {
                continue;
            }
            let refs: Vec<(String, ObjectId)> = fonts
                .into_iter()
                .map(|(key, resource)| (resource, font_object_ids[&key]))
                .collect();
            self.add_fonts_to_page_resources(page, &refs)?;
        }

        Ok(())
    }

    /// Embed a single TrueType font object chain into the PDF
    fn embed_font_object(&mut self, font_data: &FontData) -> Result<ObjectId> {
        let font_objects = font_data.to_pdf_objects()?;

        let font_file_id = self.inner.add_object(font_objects.font_file_stream);

        let mut font_descriptor = font_objects.font_descriptor;
        font_descriptor.set("FontFile2", Object::Reference(font_file_id));
        let font_descriptor_id = self.inner.add_object(font_descriptor);

        let mut cid_font = font_objects.cid_font;
        cid_font.set("FontDescriptor", Object::Reference(font_descriptor_id));
        let cid_font_id = self.inner.add_object(cid_font);

        let mut type0_font = font_objects.type0_font;
        type0_font.set(
            "DescendantFonts",
            Object::Array(vec![Object::Reference(cid_font_id)]),
        );

        let tounicode_id = self.inner.add_object(font_objects.tounicode_stream);
        type0_font.set("ToUnicode", Object::Reference(tounicode_id));

        Ok(self.inner.add_object(type0_font))
    }

    /// Add font references to a page's Resources dictionary
    fn add_fonts_to_page_resources(
        &mut self,
        page: usize,
        fonts: &[(String, ObjectId)],
    ) -> Result<()> {
        let page_id = self.page_id(page)?;

        let page_obj = self.inner.get_object(page_id)?;
        let page_dict = page_obj
            .as_dict()
            .map_err(|_| PdfError::SaveError("Page object is not a dictionary".to_string()))?;

        let mut resources_dict = dict_or_empty(page_dict.get(b"Resources").ok());
        let mut font_dict = dict_or_empty(resources_dict.get(b"Font").ok());

        for (resource_name, object_id) in fonts {
            font_dict.set(resource_name.as_bytes(), Object::Reference(*object_id));
        }

        resources_dict.set(b"Font", Object::Dictionary(font_dict));

        let mut new_page_dict = page_dict.clone();
        new_page_dict.set(b"Resources", Object::Dictionary(resources_dict));
        self.inner.objects.insert(page_id, new_page_dict.into());

        Ok(())
    }

    /// Get a reference to the underlying lopdf document
    pub fn inner(&self) -> &Document {
        &self.inner
    }

    /// Object ID of a 1-indexed page
    fn page_id(&self, page: usize) -> Result<ObjectId> {
        let pages = self.inner.get_pages();
        pages
            .get(&(page as u32))
            .copied()
            .ok_or(PdfError::InvalidPage(page, pages.len()))
    }

    /// Get page height in points
    fn get_page_height(&self, page: usize) -> Result<f64> {
        let media_box = self.get_inherited_media_box(self.page_id(page)?)?;
        media_box_extent(&media_box, 1, 3)
    }

    /// Get page width in points
    fn get_page_width(&self, page: usize) -> Result<f64> {
        let media_box = self.get_inherited_media_box(self.page_id(page)?)?;
        media_box_extent(&media_box, 0, 2)
    }

    /// Get MediaBox, following the parent inheritance chain if needed
    fn get_inherited_media_box(&self, page_id: ObjectId) -> Result<Vec<Object>> {
        let mut current_id = page_id;

        // Parent chains deeper than 10 are treated as malformed
        for _ in 0..10 {
            let obj = self.inner.get_object(current_id)?;
            let dict = obj
                .as_dict()
                .map_err(|_| PdfError::ParseError("Object is not a dictionary".to_string()))?;

            if let Ok(media_box) = dict.get(b"MediaBox").or_else(|_| dict.get(b"CropBox")) {
                let media_box_array = match media_box {
                    Object::Array(arr) => arr.clone(),
                    Object::Reference(ref_id) => self
                        .inner
                        .get_object(*ref_id)?
                        .as_array()
                        .map_err(|_| {
                            PdfError::ParseError("MediaBox reference is not an array".to_string())
                        })?
                        .clone(),
                    _ => {
                        return Err(PdfError::ParseError(
                            "MediaBox is not an array".to_string(),
                        ))
                    }
                };
                return Ok(media_box_array);
            }

            if let Ok(Object::Reference(parent_id)) = dict.get(b"Parent") {
                current_id = *parent_id;
                continue;
            }

            break;
        }

        // Fallback: assume A4
        Ok(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(A4_WIDTH as f32),
            Object::Real(A4_HEIGHT as f32),
        ])
    }

    /// Buffer content operators for a page (written at save time)
    fn buffer_content(&mut self, page: usize, content: &[u8]) {
        self.page_content_buffer
            .entry(page)
            .or_default()
            .extend_from_slice(content);
    }

    /// Flush all buffered content to page streams
    fn flush_content_buffers(&mut self) -> Result<()> {
        let mut buffers: Vec<(usize, Vec<u8>)> = self.page_content_buffer.drain().collect();
        buffers.sort_by_key(|(page, _)| *page);

        for (page, content) in buffers {
            if !content.is_empty() {
                self.append_to_content_stream(page, &content)?;
            }
        }

        Ok(())
    }

    /// Append content to a page's content stream
    ///
    /// Handles single streams, referenced streams and stream arrays, and
    /// decompresses existing content where necessary.
    fn append_to_content_stream(&mut self, page: usize, content: &[u8]) -> Result<()> {
        let page_id = self.page_id(page)?;

        let (existing_content, page_dict_clone) = {
            let page_obj = self.inner.get_object(page_id)?;
            let page_dict = page_obj
                .as_dict()
                .map_err(|_| PdfError::ParseError("Page object is not a dictionary".to_string()))?;

            let existing_content = match page_dict.get(b"Contents") {
                Ok(Object::Stream(stream)) => stream
                    .decompressed_content()
                    .unwrap_or_else(|_| stream.content.clone()),
                Ok(Object::Reference(ref_id)) => {
                    if let Ok(Object::Stream(stream)) = self.inner.get_object(*ref_id) {
                        stream
                            .decompressed_content()
                            .unwrap_or_else(|_| stream.content.clone())
                    } else {
                        Vec::new()
                    }
                }
                Ok(Object::Array(arr)) => {
                    let mut combined = Vec::new();
                    for obj in arr {
                        let stream = match obj {
                            Object::Reference(ref_id) => {
                                match self.inner.get_object(*ref_id) {
                                    Ok(Object::Stream(s)) => Some(s),
                                    _ => None,
                                }
                            }
                            Object::Stream(s) => Some(s),
                            _ => None,
                        };
                        if let Some(stream) = stream {
                            let data = stream
                                .decompressed_content()
                                .unwrap_or_else(|_| stream.content.clone());
                            combined.extend_from_slice(&data);
                        }
                    }
                    combined
                }
                _ => Vec::new(),
            };

            (existing_content, page_dict.clone())
        };

        let mut new_content = existing_content;
        // Separate any prior operators from the appended ones
        if !new_content.is_empty() && !new_content.ends_with(b"\n") {
            new_content.push(b'\n');
        }
        new_content.extend_from_slice(content);

        let new_stream = Stream::new(Dictionary::new(), new_content);
        let stream_id = self.inner.add_object(new_stream);

        let mut new_page_dict = page_dict_clone;
        new_page_dict.set(b"Contents", Object::Reference(stream_id));
        self.inner.objects.insert(page_id, new_page_dict.into());

        Ok(())
    }

    /// Get or create an image resource for a page
    ///
    /// Returns the resource name and original pixel dimensions. Images are
    /// deduplicated by a hash of their bytes.
    fn get_or_create_image_ref(&mut self, data: &[u8], page: usize) -> Result<(String, u32, u32)> {
        let mut hasher = DefaultHasher::new();
        data.hash(&mut hasher);
        let data_hash = hasher.finish();

        if !self.embedded_images.contains_key(&data_hash) {
            let xobject = ImageXObject::from_bytes(data)?;
            let stream = xobject.to_pdf_stream();
            let object_id = self.inner.add_object(stream);
            self.embedded_images.insert(data_hash, object_id);
        }

        let object_id = self.embedded_images[&data_hash];

        let xobject_stream = self.inner.get_object(object_id)?;
        let xobject_dict = &xobject_stream
            .as_stream()
            .map_err(|_| PdfError::ParseError("Image object is not a stream".to_string()))?
            .dict;
        let width = dict_u32(xobject_dict, b"Width")?;
        let height = dict_u32(xobject_dict, b"Height")?;

        let page_resources = self.page_image_resources.entry(page).or_default();
        for (name, id) in page_resources.iter() {
            if *id == object_id {
                return Ok((name.clone(), width, height));
            }
        }

        let resource_name = format!("Im{}", self.next_image_resource);
        self.next_image_resource += 1;
        page_resources.insert(resource_name.clone(), object_id);

        self.add_to_page_resources(page, b"XObject", &resource_name, object_id)?;

        Ok((resource_name, width, height))
    }

    /// Create a transparency ExtGState and register it on a page
    fn create_opacity_gstate(&mut self, page: usize, alpha: f64) -> Result<String> {
        let gstate = dictionary! {
            "Type" => "ExtGState",
            "ca" => alpha,
            "CA" => alpha,
        };
        let object_id = self.inner.add_object(Object::Dictionary(gstate));

        let gs_name = format!("GS{}", self.next_gstate);
        self.next_gstate += 1;

        self.add_to_page_resources(page, b"ExtGState", &gs_name, object_id)?;

        Ok(gs_name)
    }

    /// Add a named reference to a sub-dictionary of a page's Resources
    fn add_to_page_resources(
        &mut self,
        page: usize,
        category: &[u8],
        resource_name: &str,
        object_id: ObjectId,
    ) -> Result<()> {
        let page_id = self.page_id(page)?;

        let page_obj = self.inner.get_object(page_id)?;
        let page_dict = page_obj
            .as_dict()
            .map_err(|_| PdfError::SaveError("Page object is not a dictionary".to_string()))?;

        let mut resources_dict = dict_or_empty(page_dict.get(b"Resources").ok());
        let mut category_dict = dict_or_empty(resources_dict.get(category).ok());

        category_dict.set(resource_name.as_bytes(), Object::Reference(object_id));
        resources_dict.set(category, Object::Dictionary(category_dict));

        let mut new_page_dict = page_dict.clone();
        new_page_dict.set(b"Resources", Object::Dictionary(resources_dict));
        self.inner.objects.insert(page_id, new_page_dict.into());

        Ok(())
    }
}

/// Resolve a builtin font from its BaseFont name
fn builtin_by_base_name(name: &str) -> Option<BuiltinFont> {
    match name {
        "Helvetica" => Some(BuiltinFont::Helvetica),
        "Helvetica-Bold" => Some(BuiltinFont::HelveticaBold),
        "Helvetica-Oblique" => Some(BuiltinFont::HelveticaOblique),
        "Helvetica-BoldOblique" => Some(BuiltinFont::HelveticaBoldOblique),
        _ => None,
    }
}

/// Clone a dictionary-valued entry, or start an empty one
fn dict_or_empty(obj: Option<&Object>) -> Dictionary {
    match obj {
        Some(o) => o.as_dict().cloned().unwrap_or_default(),
        None => Dictionary::new(),
    }
}

/// Read an integer dictionary entry as u32
fn dict_u32(dict: &Dictionary, key: &[u8]) -> Result<u32> {
    dict.get(key)
        .ok()
        .and_then(|v| v.as_i64().ok())
        .map(|v| v as u32)
        .ok_or_else(|| {
            PdfError::ParseError(format!(
                "Image missing {}",
                String::from_utf8_lossy(key)
            ))
        })
}

/// Compute an extent (e.g. width or height) from a MediaBox array as the
/// difference between the coordinate at index `hi` and index `lo`.
fn media_box_extent(media_box: &[Object], lo: usize, hi: usize) -> Result<f64> {
    if media_box.len() >= 4 {
        let low = object_as_f64(&media_box[lo])
            .ok_or_else(|| PdfError::ParseError("Invalid MediaBox coordinate".to_string()))?;
        let high = object_as_f64(&media_box[hi])
            .ok_or_else(|| PdfError::ParseError("Invalid MediaBox coordinate".to_string()))?;
        return Ok(high - low);
    }

    Err(PdfError::ParseError("Invalid MediaBox format".to_string()))
}

/// Read a numeric PDF object as `f64`, accepting both reals and integers.
fn object_as_f64(obj: &Object) -> Option<f64> {
    obj.as_f32()
        .map(|v| v as f64)
        .ok()
        .or_else(|| obj.as_i64().ok().map(|v| v as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_a4_has_one_page() {
        let doc = PdfDocument::new_a4();
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn test_new_a4_page_height() {
        let doc = PdfDocument::new_a4();
        let height = doc.get_page_height(1).unwrap();
        assert!((height - A4_HEIGHT).abs() < 0.01);
        let width = doc.get_page_width(1).unwrap();
        assert!((width - A4_WIDTH).abs() < 0.01);
    }

    #[test]
    fn test_insert_text_invalid_page() {
        let mut doc = PdfDocument::new_a4();
        let err = doc.insert_text("x", 2, 0.0, 0.0, Align::Left);
        assert!(matches!(err, Err(PdfError::InvalidPage(2, 1))));
    }

    #[test]
    fn test_insert_empty_text_is_noop() {
        let mut doc = PdfDocument::new_a4();
        doc.insert_text("", 1, 10.0, 10.0, Align::Left).unwrap();
        assert!(doc.page_content_buffer.is_empty());
    }

    #[test]
    fn test_set_unknown_embedded_font() {
        let mut doc = PdfDocument::new_a4();
        let err = doc.set_font(Font::Embedded("missing".to_string()), 10.0);
        assert!(matches!(err, Err(PdfError::FontNotFound(_))));
    }

    #[test]
    fn test_register_font_rejects_garbage() {
        let mut doc = PdfDocument::new_a4();
        assert!(doc.register_font("bad", &[0u8; 8]).is_err());
    }

    #[test]
    fn test_builtin_glyph_coverage() {
        let doc = PdfDocument::new_a4();
        let font = Font::Builtin(BuiltinFont::Helvetica);
        assert!(doc.font_has_glyph(&font, 'A'));
        assert!(!doc.font_has_glyph(&font, '₹'));
    }

    #[test]
    fn test_roundtrip_through_lopdf() {
        let mut doc = PdfDocument::new_a4();
        doc.set_font(Font::Builtin(BuiltinFont::HelveticaBold), 14.0)
            .unwrap();
        doc.insert_text("SALES ORDER", 1, 297.6, 40.0, Align::Center)
            .unwrap();
        doc.draw_rect(1, 24.0, 60.0, 547.0, 120.0, 0.75).unwrap();

        let bytes = doc.to_bytes().unwrap();
        let reopened = Document::load_mem(&bytes).unwrap();
        assert_eq!(reopened.get_pages().len(), 1);
    }
}
