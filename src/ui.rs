use crate::document::{Element, FILL_SWATCH_ID, STROKE_SWATCH_ID};
use crate::drawing::{ShapeKind, SourceId, StyleKind};
use crate::math::TAU;
use crate::surface::Rgba;
use crate::vertex::UiVertex;

const TILE_SIZE: [f32; 2] = [40.0, 40.0];
const TILE_COLOR: Rgba = [0.8, 0.8, 0.8, 1.0];
const ACTIVE_TILE_COLOR: Rgba = [0.5, 0.7, 1.0, 1.0];
const GLYPH_COLOR: Rgba = [0.2, 0.2, 0.2, 1.0];
const BAR_COLOR: Rgba = [0.95, 0.95, 0.95, 0.9];

/// Colors a swatch cycles through when clicked.
pub const COLOR_CYCLE: [Rgba; 6] = [
    [0.0, 0.0, 0.0, 1.0],
    [0.9, 0.1, 0.1, 1.0],
    [0.1, 0.7, 0.2, 1.0],
    [0.1, 0.3, 0.9, 1.0],
    [0.95, 0.8, 0.1, 1.0],
    [1.0, 1.0, 1.0, 1.0],
];

struct PaletteItem {
    source: SourceId,
    position: [f32; 2],
    size: [f32; 2],
}

struct Swatch {
    id: &'static str,
    position: [f32; 2],
    size: [f32; 2],
}

/// Generates the palette strip and hit-tests pointer positions against
/// it. The palette items are the draggable shape sources; the two
/// swatches show and cycle the current stroke/fill colors.
pub struct PaletteRenderer {
    items: Vec<PaletteItem>,
    swatches: [Swatch; 2],
}

impl PaletteRenderer {
    pub fn new() -> Self {
        let sources = [
            SourceId { style: StyleKind::Stroke, shape: ShapeKind::Rect },
            SourceId { style: StyleKind::Fill, shape: ShapeKind::Rect },
            SourceId { style: StyleKind::Stroke, shape: ShapeKind::Circle },
            SourceId { style: StyleKind::Fill, shape: ShapeKind::Circle },
        ];
        let items = sources
            .into_iter()
            .enumerate()
            .map(|(i, source)| PaletteItem {
                source,
                position: [10.0 + i as f32 * 50.0, 10.0],
                size: TILE_SIZE,
            })
            .collect();

        let swatches = [
            Swatch {
                id: STROKE_SWATCH_ID,
                position: [220.0, 10.0],
                size: TILE_SIZE,
            },
            Swatch {
                id: FILL_SWATCH_ID,
                position: [270.0, 10.0],
                size: TILE_SIZE,
            },
        ];

        Self { items, swatches }
    }

    /// Document elements for the palette items, declared at tile size.
    /// Dropped shapes come out at twice these dimensions.
    pub fn source_elements(&self) -> Vec<Element> {
        self.items
            .iter()
            .map(|item| Element::source(item.source.to_string(), item.size))
            .collect()
    }

    /// The palette item under the pointer, with the pointer offset
    /// within it (the drag payload's layer coordinates).
    pub fn hit_source(&self, mouse_pos: [f32; 2]) -> Option<(String, [f32; 2])> {
        self.items.iter().find_map(|item| {
            contains(item.position, item.size, mouse_pos).then(|| {
                (
                    item.source.to_string(),
                    [
                        mouse_pos[0] - item.position[0],
                        mouse_pos[1] - item.position[1],
                    ],
                )
            })
        })
    }

    pub fn hit_swatch(&self, mouse_pos: [f32; 2]) -> Option<&'static str> {
        self.swatches
            .iter()
            .find(|swatch| contains(swatch.position, swatch.size, mouse_pos))
            .map(|swatch| swatch.id)
    }

    pub fn is_over_ui(&self, mouse_pos: [f32; 2]) -> bool {
        contains([5.0, 5.0], [315.0, 50.0], mouse_pos)
    }

    pub fn next_color(current: Rgba) -> Rgba {
        let index = COLOR_CYCLE
            .iter()
            .position(|c| {
                c.iter()
                    .zip(current.iter())
                    .all(|(a, b)| (a - b).abs() < 0.001)
            })
            .unwrap_or(COLOR_CYCLE.len() - 1);
        COLOR_CYCLE[(index + 1) % COLOR_CYCLE.len()]
    }

    pub fn generate_ui_vertices(
        &self,
        stroke_color: Rgba,
        fill_color: Rgba,
        drag_source: Option<&str>,
    ) -> (Vec<UiVertex>, Vec<u16>) {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        let mut index_offset = 0u16;

        add_quad(
            &mut vertices,
            &mut indices,
            &mut index_offset,
            [5.0, 5.0],
            [315.0, 50.0],
            BAR_COLOR,
        );

        for item in &self.items {
            let id = item.source.to_string();
            let tile_color = if drag_source == Some(id.as_str()) {
                ACTIVE_TILE_COLOR
            } else {
                TILE_COLOR
            };
            add_quad(
                &mut vertices,
                &mut indices,
                &mut index_offset,
                item.position,
                item.size,
                tile_color,
            );

            let center = [
                item.position[0] + item.size[0] / 2.0,
                item.position[1] + item.size[1] / 2.0,
            ];
            match (item.source.shape, item.source.style) {
                (ShapeKind::Rect, StyleKind::Stroke) => {
                    add_rect_outline(
                        &mut vertices,
                        &mut indices,
                        &mut index_offset,
                        [center[0] - 12.0, center[1] - 9.0],
                        [24.0, 18.0],
                        GLYPH_COLOR,
                    );
                }
                (ShapeKind::Rect, StyleKind::Fill) => {
                    add_quad(
                        &mut vertices,
                        &mut indices,
                        &mut index_offset,
                        [center[0] - 12.0, center[1] - 9.0],
                        [24.0, 18.0],
                        GLYPH_COLOR,
                    );
                }
                (ShapeKind::Circle, StyleKind::Stroke) => {
                    add_circle_outline(
                        &mut vertices,
                        &mut indices,
                        &mut index_offset,
                        center,
                        12.0,
                        GLYPH_COLOR,
                    );
                }
                (ShapeKind::Circle, StyleKind::Fill) => {
                    add_circle_fill(
                        &mut vertices,
                        &mut indices,
                        &mut index_offset,
                        center,
                        12.0,
                        GLYPH_COLOR,
                    );
                }
            }
        }

        for swatch in &self.swatches {
            let color = if swatch.id == STROKE_SWATCH_ID {
                stroke_color
            } else {
                fill_color
            };
            add_quad(
                &mut vertices,
                &mut indices,
                &mut index_offset,
                swatch.position,
                swatch.size,
                color,
            );
            add_rect_outline(
                &mut vertices,
                &mut indices,
                &mut index_offset,
                swatch.position,
                swatch.size,
                GLYPH_COLOR,
            );
        }

        (vertices, indices)
    }
}

impl Default for PaletteRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn contains(position: [f32; 2], size: [f32; 2], point: [f32; 2]) -> bool {
    point[0] >= position[0]
        && point[0] <= position[0] + size[0]
        && point[1] >= position[1]
        && point[1] <= position[1] + size[1]
}

fn add_quad(
    vertices: &mut Vec<UiVertex>,
    indices: &mut Vec<u16>,
    index_offset: &mut u16,
    position: [f32; 2],
    size: [f32; 2],
    color: Rgba,
) {
    vertices.extend_from_slice(&[
        UiVertex { position, color },
        UiVertex {
            position: [position[0] + size[0], position[1]],
            color,
        },
        UiVertex {
            position: [position[0] + size[0], position[1] + size[1]],
            color,
        },
        UiVertex {
            position: [position[0], position[1] + size[1]],
            color,
        },
    ]);
    indices.extend_from_slice(&[
        *index_offset,
        *index_offset + 1,
        *index_offset + 2,
        *index_offset,
        *index_offset + 2,
        *index_offset + 3,
    ]);
    *index_offset += 4;
}

fn add_line(
    vertices: &mut Vec<UiVertex>,
    indices: &mut Vec<u16>,
    index_offset: &mut u16,
    start: [f32; 2],
    end: [f32; 2],
    width: f32,
    color: Rgba,
) {
    let dx = end[0] - start[0];
    let dy = end[1] - start[1];
    let len = (dx * dx + dy * dy).sqrt();

    if len > 0.0 {
        let nx = -dy / len * width * 0.5;
        let ny = dx / len * width * 0.5;

        vertices.extend_from_slice(&[
            UiVertex {
                position: [start[0] - nx, start[1] - ny],
                color,
            },
            UiVertex {
                position: [start[0] + nx, start[1] + ny],
                color,
            },
            UiVertex {
                position: [end[0] + nx, end[1] + ny],
                color,
            },
            UiVertex {
                position: [end[0] - nx, end[1] - ny],
                color,
            },
        ]);
        indices.extend_from_slice(&[
            *index_offset,
            *index_offset + 1,
            *index_offset + 2,
            *index_offset,
            *index_offset + 2,
            *index_offset + 3,
        ]);
        *index_offset += 4;
    }
}

fn add_rect_outline(
    vertices: &mut Vec<UiVertex>,
    indices: &mut Vec<u16>,
    index_offset: &mut u16,
    position: [f32; 2],
    size: [f32; 2],
    color: Rgba,
) {
    let corners = [
        position,
        [position[0] + size[0], position[1]],
        [position[0] + size[0], position[1] + size[1]],
        [position[0], position[1] + size[1]],
    ];
    for i in 0..4 {
        add_line(
            vertices,
            indices,
            index_offset,
            corners[i],
            corners[(i + 1) % 4],
            2.0,
            color,
        );
    }
}

fn add_circle_outline(
    vertices: &mut Vec<UiVertex>,
    indices: &mut Vec<u16>,
    index_offset: &mut u16,
    center: [f32; 2],
    radius: f32,
    color: Rgba,
) {
    const SEGMENTS: u32 = 16;
    for i in 0..SEGMENTS {
        let angle1 = (i as f32 * TAU) / SEGMENTS as f32;
        let angle2 = ((i + 1) as f32 * TAU) / SEGMENTS as f32;
        let p1 = [
            center[0] + angle1.cos() * radius,
            center[1] + angle1.sin() * radius,
        ];
        let p2 = [
            center[0] + angle2.cos() * radius,
            center[1] + angle2.sin() * radius,
        ];
        add_line(vertices, indices, index_offset, p1, p2, 2.0, color);
    }
}

fn add_circle_fill(
    vertices: &mut Vec<UiVertex>,
    indices: &mut Vec<u16>,
    index_offset: &mut u16,
    center: [f32; 2],
    radius: f32,
    color: Rgba,
) {
    const SEGMENTS: u32 = 16;
    let center_index = *index_offset;
    vertices.push(UiVertex {
        position: center,
        color,
    });
    for i in 0..SEGMENTS {
        let angle = (i as f32 * TAU) / SEGMENTS as f32;
        vertices.push(UiVertex {
            position: [
                center[0] + angle.cos() * radius,
                center[1] + angle.sin() * radius,
            ],
            color,
        });
    }
    for i in 0..SEGMENTS as u16 {
        indices.extend_from_slice(&[
            center_index,
            center_index + 1 + i,
            center_index + 1 + (i + 1) % SEGMENTS as u16,
        ]);
    }
    *index_offset += 1 + SEGMENTS as u16;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_declares_all_four_sources() {
        let palette = PaletteRenderer::new();
        let ids: Vec<String> = palette
            .source_elements()
            .into_iter()
            .map(|el| el.id)
            .collect();
        assert_eq!(ids, ["stroke_rect", "fill_rect", "stroke_circle", "fill_circle"]);
        assert!(palette.source_elements().iter().all(|el| el.size == TILE_SIZE));
    }

    #[test]
    fn hit_source_reports_the_layer_offset() {
        let palette = PaletteRenderer::new();
        let (id, offset) = palette.hit_source([15.0, 18.0]).unwrap();
        assert_eq!(id, "stroke_rect");
        assert_eq!(offset, [5.0, 8.0]);

        let (id, _) = palette.hit_source([165.0, 20.0]).unwrap();
        assert_eq!(id, "fill_circle");

        assert!(palette.hit_source([400.0, 400.0]).is_none());
    }

    #[test]
    fn hit_swatch_finds_the_fixed_swatch_ids() {
        let palette = PaletteRenderer::new();
        assert_eq!(palette.hit_swatch([225.0, 15.0]), Some(STROKE_SWATCH_ID));
        assert_eq!(palette.hit_swatch([275.0, 15.0]), Some(FILL_SWATCH_ID));
        assert_eq!(palette.hit_swatch([15.0, 15.0]), None);
    }

    #[test]
    fn ui_bounds_cover_palette_and_swatches() {
        let palette = PaletteRenderer::new();
        assert!(palette.is_over_ui([15.0, 15.0]));
        assert!(palette.is_over_ui([300.0, 40.0]));
        assert!(!palette.is_over_ui([15.0, 200.0]));
    }

    #[test]
    fn color_cycle_wraps_around() {
        let mut color = COLOR_CYCLE[0];
        for _ in 0..COLOR_CYCLE.len() {
            color = PaletteRenderer::next_color(color);
        }
        assert_eq!(color, COLOR_CYCLE[0]);
    }

    #[test]
    fn generates_nonempty_palette_geometry() {
        let palette = PaletteRenderer::new();
        let (vertices, indices) =
            palette.generate_ui_vertices(COLOR_CYCLE[0], COLOR_CYCLE[1], None);
        assert!(!vertices.is_empty());
        assert_eq!(indices.len() % 3, 0);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }
}
