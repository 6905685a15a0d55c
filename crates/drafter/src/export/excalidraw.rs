//! Excalidraw file export.
//!
//! The document model stores labels inline on their shape or connector. In
//! the file each label becomes a separate `text` record bound to its
//! container: the container lists it in `boundElements`, the text points back
//! through `containerId`, and the text record immediately follows the
//! container in `elements`.

use log::debug;
use serde::Serialize;
use serde_json::{Map, Value};

use drafter_core::{
    color::Color,
    document::Document,
    element::{
        Appearance, Connector, ConnectorKind, Element, ElementKind, Label, Shape, Text,
        estimate_text_size,
    },
    geometry::{Bounds, Point},
    identifier::{ElementId, GroupId},
    style::{Arrowhead, FillStyle, FontFamily, StrokeStyle, TextAlign, VerticalAlign},
};

use crate::{error::DrafterError, export::Exporter};

const FILE_TYPE: &str = "excalidraw";
const FILE_VERSION: u32 = 2;
const SOURCE: &str = "https://excalidraw.com";
const GRID_SIZE: u32 = 20;
const GRID_STEP: u32 = 5;
const LINE_HEIGHT: f32 = 1.25;

/// Adaptive corner radius.
const ROUNDNESS_ADAPTIVE: u8 = 3;

/// Serializes documents as `.excalidraw` JSON.
#[derive(Debug, Clone, Copy)]
pub struct ExcalidrawExporter {
    pretty: bool,
}

impl Default for ExcalidrawExporter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl ExcalidrawExporter {
    /// Exporter producing single-line JSON.
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Exporter for ExcalidrawExporter {
    fn export_document(&self, document: &Document) -> Result<String, DrafterError> {
        let file = FileRecord::new(document);
        debug!(elements = file.elements.len(); "Excalidraw document rendered");

        let json = if self.pretty {
            serde_json::to_string_pretty(&file)?
        } else {
            serde_json::to_string(&file)?
        };
        Ok(json)
    }
}

/// Serializes `document` as pretty-printed Excalidraw JSON.
pub fn to_json(document: &Document) -> Result<String, DrafterError> {
    ExcalidrawExporter::default().export_document(document)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileRecord<'a> {
    #[serde(rename = "type")]
    file_type: &'static str,
    version: u32,
    source: &'static str,
    elements: Vec<Record<'a>>,
    app_state: AppState,
    files: Map<String, Value>,
}

impl<'a> FileRecord<'a> {
    fn new(document: &'a Document) -> Self {
        let mut elements = Vec::with_capacity(document.len());
        for element in document.iter() {
            push_records(&mut elements, element);
        }

        Self {
            file_type: FILE_TYPE,
            version: FILE_VERSION,
            source: SOURCE,
            elements,
            app_state: AppState {
                grid_size: GRID_SIZE,
                grid_step: GRID_STEP,
                grid_mode_enabled: false,
                view_background_color: document.background().to_hex(),
            },
            files: Map::new(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AppState {
    grid_size: u32,
    grid_step: u32,
    grid_mode_enabled: bool,
    view_background_color: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Record<'a> {
    Shape(BaseRecord<'a>),
    Text(TextRecord<'a>),
    Arrow(ArrowRecord<'a>),
}

/// Fields shared by every element record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BaseRecord<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    element_type: &'static str,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    angle: f32,
    stroke_color: String,
    background_color: String,
    fill_style: FillStyle,
    stroke_width: f32,
    stroke_style: StrokeStyle,
    roughness: u8,
    opacity: u8,
    seed: u32,
    version: u32,
    version_nonce: u32,
    index: Option<String>,
    is_deleted: bool,
    group_ids: &'a [GroupId],
    frame_id: Option<&'a str>,
    bound_elements: Option<Vec<BoundElement<'a>>>,
    updated: u64,
    link: Option<&'a str>,
    locked: bool,
    roundness: Option<Roundness>,
}

impl<'a> BaseRecord<'a> {
    fn new(
        element: &'a Element,
        element_type: &'static str,
        bounds: Bounds,
        appearance: &Appearance,
    ) -> Self {
        Self {
            id: element.id().as_str(),
            element_type,
            x: bounds.min_x(),
            y: bounds.min_y(),
            width: bounds.width(),
            height: bounds.height(),
            angle: 0.0,
            stroke_color: appearance.stroke_color().to_hex(),
            background_color: appearance.background_color().to_hex(),
            fill_style: appearance.fill_style(),
            stroke_width: appearance.stroke_width(),
            stroke_style: appearance.stroke_style(),
            roughness: appearance.roughness(),
            opacity: appearance.opacity(),
            seed: element.seed(),
            version: 1,
            version_nonce: element.version_nonce(),
            index: None,
            is_deleted: false,
            group_ids: element.group_ids(),
            frame_id: None,
            bound_elements: element.label().map(|label| vec![BoundElement::text(label.id())]),
            updated: 1,
            link: None,
            locked: false,
            roundness: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct BoundElement<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    element_type: &'static str,
}

impl<'a> BoundElement<'a> {
    fn text(id: &'a ElementId) -> Self {
        Self {
            id: id.as_str(),
            element_type: "text",
        }
    }
}

#[derive(Debug, Serialize)]
struct Roundness {
    #[serde(rename = "type")]
    roundness_type: u8,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TextRecord<'a> {
    #[serde(flatten)]
    base: BaseRecord<'a>,
    font_size: f32,
    font_family: FontFamily,
    text: &'a str,
    original_text: &'a str,
    text_align: TextAlign,
    vertical_align: VerticalAlign,
    container_id: Option<&'a str>,
    auto_resize: bool,
    line_height: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ArrowRecord<'a> {
    #[serde(flatten)]
    base: BaseRecord<'a>,
    points: [[f32; 2]; 2],
    last_committed_point: Option<[f32; 2]>,
    start_binding: Option<Value>,
    end_binding: Option<Value>,
    start_arrowhead: Option<Arrowhead>,
    end_arrowhead: Option<Arrowhead>,
    /// Only arrows can be elbowed; line records omit the field.
    #[serde(skip_serializing_if = "Option::is_none")]
    elbowed: Option<bool>,
}

/// Appends the records of `element`: the element itself, then its bound label.
fn push_records<'a>(records: &mut Vec<Record<'a>>, element: &'a Element) {
    match element.kind() {
        ElementKind::Shape(shape) => {
            records.push(Record::Shape(shape_record(element, shape)));
            if let Some(label) = shape.label() {
                records.push(Record::Text(label_record(element, label, shape.bounds())));
            }
        }
        ElementKind::Text(text) => records.push(Record::Text(text_record(element, text))),
        ElementKind::Connector(connector) => {
            records.push(Record::Arrow(arrow_record(element, connector)));
            if let Some(label) = connector.label() {
                let size = estimate_text_size(label.text(), label.font_size());
                let mid = connector.midpoint();
                let top_left = mid.sub_point(Point::new(size.width() / 2.0, size.height() / 2.0));
                let bounds = Bounds::new_from_top_left(top_left, size);
                records.push(Record::Text(label_record(element, label, bounds)));
            }
        }
    }
}

fn shape_record<'a>(element: &'a Element, shape: &Shape) -> BaseRecord<'a> {
    let mut base =
        BaseRecord::new(element, shape.kind().as_str(), shape.bounds(), shape.appearance());
    if shape.is_rounded() {
        base.roundness = Some(Roundness {
            roundness_type: ROUNDNESS_ADAPTIVE,
        });
    }
    base
}

fn text_record<'a>(element: &'a Element, text: &'a Text) -> TextRecord<'a> {
    let appearance = text_appearance(text.color());
    TextRecord {
        base: BaseRecord::new(element, "text", text.bounds(), &appearance),
        font_size: text.font_size(),
        font_family: text.font_family(),
        text: text.content(),
        original_text: text.content(),
        text_align: text.align(),
        vertical_align: text.vertical_align(),
        container_id: None,
        auto_resize: true,
        line_height: LINE_HEIGHT,
    }
}

/// Text record of a label bound to `container`, laid over `bounds`.
fn label_record<'a>(container: &'a Element, label: &'a Label, bounds: Bounds) -> TextRecord<'a> {
    let appearance = text_appearance(label.color());
    let mut base = BaseRecord::new(container, "text", bounds, &appearance);
    base.id = label.id().as_str();
    base.seed = label.seed();
    base.version_nonce = label.version_nonce();
    base.bound_elements = None;

    TextRecord {
        base,
        font_size: label.font_size(),
        font_family: label.font_family(),
        text: label.text(),
        original_text: label.text(),
        text_align: TextAlign::Center,
        vertical_align: VerticalAlign::Middle,
        container_id: Some(container.id().as_str()),
        auto_resize: true,
        line_height: LINE_HEIGHT,
    }
}

fn arrow_record<'a>(element: &'a Element, connector: &Connector) -> ArrowRecord<'a> {
    let start = connector.start();
    let delta = connector.delta();
    let size = delta.abs();

    let kind = connector.kind();
    let mut base =
        BaseRecord::new(element, kind.as_str(), connector.bounds(), connector.appearance());
    base.x = start.x();
    base.y = start.y();
    base.width = size.x();
    base.height = size.y();

    ArrowRecord {
        base,
        points: [[0.0, 0.0], [delta.x(), delta.y()]],
        last_committed_point: None,
        start_binding: None,
        end_binding: None,
        start_arrowhead: connector.start_arrowhead(),
        end_arrowhead: connector.end_arrowhead(),
        elbowed: (kind == ConnectorKind::Arrow).then_some(false),
    }
}

fn text_appearance(color: Color) -> Appearance {
    Appearance::default().with_stroke_color(color)
}
