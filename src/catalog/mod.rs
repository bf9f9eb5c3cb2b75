//! Design Catalog
//!
//! Fixed prompt libraries for architectural renders, so callers can pick a
//! style, view or material by id instead of hand-writing prompts.
//!
//! # Families
//!
//! - **Styles**: facade treatments that keep the building's shape
//! - **Views**: camera positions for re-rendering the same building
//! - **Materials**: surface finishes applied to one [`MaterialTarget`]
//! - **Presets**: initial render prompts per building type

use std::fmt;
use std::str::FromStr;

use crate::error::GatewayError;

/// Facade style applied through the edit model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchitecturalStyle {
    pub id: &'static str,
    pub name: &'static str,
    pub prompt: &'static str,
}

/// Camera position for a full re-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewAngle {
    pub id: &'static str,
    pub name: &'static str,
    /// Fragment inserted into [`view_change_prompt`].
    pub prompt: &'static str,
}

/// Surface finish used in material simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Material {
    /// Text sent to the model.
    pub value: &'static str,
    pub label: &'static str,
}

/// Initial render prompt for one building type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub prompt: &'static str,
}

// ============================================================================
// Styles
// ============================================================================

macro_rules! style {
    ($id:literal, $name:literal, $treatment:literal, $skin:literal) => {
        ArchitecturalStyle {
            id: $id,
            name: $name,
            prompt: concat!(
                "Apply ",
                $treatment,
                " facade treatment to this building. ",
                "Keep the exact same building shape, structure, proportions, and layout completely unchanged. ",
                "Only modify the exterior skin with ",
                $skin,
                "."
            ),
        }
    };
}

pub const ARCHITECTURAL_STYLES: [ArchitecturalStyle; 10] = [
    style!(
        "modern",
        "Modern",
        "a modern",
        "clean lines, flat surfaces, large glass panels, and minimal ornamentation"
    ),
    style!(
        "gothic",
        "Gothic",
        "a Gothic",
        "pointed arch window frames, Gothic tracery patterns, ornate stone carvings, and Gothic decorative elements on the surface"
    ),
    style!(
        "classic",
        "Classic",
        "a Classical",
        "classical columns, cornices, pediments, symmetrical window arrangements, and Greco-Roman decorative moldings"
    ),
    style!(
        "minimalism",
        "Minimalism",
        "a minimalist",
        "pure white or concrete surfaces, frameless windows, zero ornamentation, and clean material finishes"
    ),
    style!(
        "surrealism",
        "Surrealism",
        "a surrealist",
        "dream-like textures, unexpected color combinations, melting or warped surface patterns, and surreal decorative elements"
    ),
    style!(
        "brutalism",
        "Brutalism",
        "a Brutalist",
        "raw exposed concrete surfaces, board-formed concrete textures, deep-set windows, and heavy unfinished material finishes"
    ),
    style!(
        "industrial",
        "Industrial",
        "an Industrial",
        "exposed steel beams, metal cladding, visible rivets, corrugated metal panels, and brick surfaces"
    ),
    style!(
        "bauhaus",
        "Bauhaus",
        "a Bauhaus",
        "flat white walls, primary color accents, steel-frame windows in geometric grids, and functional material finishes"
    ),
    style!(
        "art_deco",
        "Art Deco",
        "an Art Deco",
        "geometric decorative patterns, chevron motifs, gold accent trim, sunburst designs, and streamlined ornamental details"
    ),
    style!(
        "deconstructivism",
        "Deconstructivism",
        "a Deconstructivist",
        "fragmented panel cladding, angular metal sheets, asymmetric window placements, and conflicting material textures"
    ),
];

// ============================================================================
// Views
// ============================================================================

pub const VIEW_ANGLES: [ViewAngle; 6] = [
    ViewAngle {
        id: "front",
        name: "Front Elevation",
        prompt: "a straight-on front elevation view of the building",
    },
    ViewAngle {
        id: "left",
        name: "Left Elevation",
        prompt: "a straight-on left side elevation view of the building",
    },
    ViewAngle {
        id: "right",
        name: "Right Elevation",
        prompt: "a straight-on right side elevation view of the building",
    },
    ViewAngle {
        id: "rear",
        name: "Rear Elevation",
        prompt: "a straight-on rear elevation view of the building",
    },
    ViewAngle {
        id: "isometric",
        name: "Isometric",
        prompt: "an isometric view of the building from a high angle, showing the overall structure",
    },
    ViewAngle {
        id: "perspective",
        name: "Perspective",
        prompt: "a realistic street-level perspective view of the building",
    },
];

// ============================================================================
// Materials
// ============================================================================

pub const MATERIALS: [Material; 6] = [
    Material {
        value: "marble texture",
        label: "Marble",
    },
    Material {
        value: "exposed concrete",
        label: "Concrete",
    },
    Material {
        value: "wood planks",
        label: "Wood",
    },
    Material {
        value: "brick wall",
        label: "Brick",
    },
    Material {
        value: "glass curtain wall",
        label: "Glass",
    },
    Material {
        value: "steel panels",
        label: "Steel",
    },
];

/// Building element a material is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MaterialTarget {
    #[default]
    Floor,
    ExteriorWall,
    Roof,
    Windows,
    Columns,
}

impl MaterialTarget {
    pub const ALL: [Self; 5] = [
        Self::Floor,
        Self::ExteriorWall,
        Self::Roof,
        Self::Windows,
        Self::Columns,
    ];

    /// Text sent to the model.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Floor => "floor",
            Self::ExteriorWall => "exterior wall",
            Self::Roof => "roof",
            Self::Windows => "windows",
            Self::Columns => "columns",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Floor => "Floor",
            Self::ExteriorWall => "Ext. Wall",
            Self::Roof => "Roof",
            Self::Windows => "Windows",
            Self::Columns => "Columns",
        }
    }
}

impl fmt::Display for MaterialTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaterialTarget {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s) || t.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| GatewayError::InvalidInput(format!("unknown material target: {s}")))
    }
}

// ============================================================================
// Render presets
// ============================================================================

/// Default prompt for the first render of a sketch.
pub const INITIAL_PROMPT: &str =
    "Create a photorealistic 3D rendering of a residential building based on this sketch.";

/// Prompt for a typical-floor plan of the rendered building.
pub const FLOOR_PLAN_PROMPT: &str = "Create a detailed 2D architectural floor plan of this building's typical floor. Include furniture, doors, windows, and room labels.";

pub const RENDER_PRESETS: [RenderPreset; 8] = [
    RenderPreset {
        id: "residential",
        name: "Residential",
        emoji: "🏠",
        prompt: "Create a photorealistic 3D rendering of a residential building based on this sketch. Include warm lighting, landscaping, and lived-in details.",
    },
    RenderPreset {
        id: "apartment",
        name: "Apartment Complex",
        emoji: "🏢",
        prompt: "Create a photorealistic 3D rendering of a large apartment complex based on this sketch. Include parking, landscaping, community facilities, and pedestrian paths.",
    },
    RenderPreset {
        id: "office",
        name: "Commercial Office",
        emoji: "🏛️",
        prompt: "Create a photorealistic 3D rendering of a commercial office building based on this sketch. Include a glass curtain wall, a lobby entrance, and the surrounding urban context.",
    },
    RenderPreset {
        id: "museum",
        name: "Museum / Gallery",
        emoji: "🏛",
        prompt: "Create a photorealistic 3D rendering of a contemporary museum or gallery based on this sketch. Show natural daylight, generous exhibition space, and a sculptural exterior.",
    },
    RenderPreset {
        id: "cafe",
        name: "Cafe / Restaurant",
        emoji: "☕",
        prompt: "Create a photorealistic 3D rendering of a stylish cafe or restaurant based on this sketch. Show a terrace, warm interior lighting, plant decor, and a cozy atmosphere.",
    },
    RenderPreset {
        id: "school",
        name: "Educational Facility",
        emoji: "🏫",
        prompt: "Create a photorealistic 3D rendering of an educational facility based on this sketch. Include bright classrooms, wide corridors, a playground, and safe entrances.",
    },
    RenderPreset {
        id: "church",
        name: "Religious Facility",
        emoji: "⛪",
        prompt: "Create a photorealistic 3D rendering of a religious building based on this sketch. Show high ceilings, stained glass, and a reverent atmosphere with falling natural light.",
    },
    RenderPreset {
        id: "warehouse",
        name: "Logistics / Factory",
        emoji: "🏭",
        prompt: "Create a photorealistic 3D rendering of a warehouse or factory building based on this sketch. Include large doors, loading areas, and industrial details.",
    },
];

// ============================================================================
// Lookup and prompt builders
// ============================================================================

pub fn style(id: &str) -> Option<&'static ArchitecturalStyle> {
    ARCHITECTURAL_STYLES.iter().find(|s| s.id == id)
}

pub fn view_angle(id: &str) -> Option<&'static ViewAngle> {
    VIEW_ANGLES.iter().find(|v| v.id == id)
}

/// Match by model value or display label, ignoring case.
pub fn material(value_or_label: &str) -> Option<&'static Material> {
    let key = value_or_label.trim();
    MATERIALS
        .iter()
        .find(|m| m.value.eq_ignore_ascii_case(key) || m.label.eq_ignore_ascii_case(key))
}

pub fn render_preset(id: &str) -> Option<&'static RenderPreset> {
    RENDER_PRESETS.iter().find(|p| p.id == id)
}

/// `Show {view} view.`
pub fn view_change_prompt(view: &ViewAngle) -> String {
    format!("Show {} view.", view.prompt)
}

/// `Change only the {target} of the building to {material}.`
pub fn material_prompt(target: MaterialTarget, material: &Material) -> String {
    format!(
        "Change only the {} of the building to {}.",
        target.as_str(),
        material.value
    )
}
