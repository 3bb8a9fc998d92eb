use glam::Vec3;
use std::fmt::Write as _;
use tabletop_scene::ProgramState;

/// Number of scalars in a complete state file.
pub const FIELD_COUNT: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Scalar {
    Float(f32),
    Flag(bool),
}

/// One persisted scalar, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    ClearR,
    ClearG,
    ClearB,
    Overlay,
    Spotlight,
    CameraX,
    CameraY,
    CameraZ,
    FrontX,
    FrontY,
    FrontZ,
    CupX,
    CupY,
    CupZ,
    CupScale,
}

impl Field {
    const ORDER: [Field; FIELD_COUNT] = [
        Field::ClearR,
        Field::ClearG,
        Field::ClearB,
        Field::Overlay,
        Field::Spotlight,
        Field::CameraX,
        Field::CameraY,
        Field::CameraZ,
        Field::FrontX,
        Field::FrontY,
        Field::FrontZ,
        Field::CupX,
        Field::CupY,
        Field::CupZ,
        Field::CupScale,
    ];

    fn name(self) -> &'static str {
        match self {
            Field::ClearR => "clear_color.r",
            Field::ClearG => "clear_color.g",
            Field::ClearB => "clear_color.b",
            Field::Overlay => "overlay_enabled",
            Field::Spotlight => "spotlight_enabled",
            Field::CameraX => "camera.position.x",
            Field::CameraY => "camera.position.y",
            Field::CameraZ => "camera.position.z",
            Field::FrontX => "camera.front.x",
            Field::FrontY => "camera.front.y",
            Field::FrontZ => "camera.front.z",
            Field::CupX => "cup_position.x",
            Field::CupY => "cup_position.y",
            Field::CupZ => "cup_position.z",
            Field::CupScale => "cup_scale",
        }
    }

    fn is_flag(self) -> bool {
        matches!(self, Field::Overlay | Field::Spotlight)
    }

    fn read(self, state: &ProgramState) -> Scalar {
        let front = state.camera.front();
        match self {
            Field::ClearR => Scalar::Float(state.clear_color.x),
            Field::ClearG => Scalar::Float(state.clear_color.y),
            Field::ClearB => Scalar::Float(state.clear_color.z),
            Field::Overlay => Scalar::Flag(state.overlay_enabled),
            Field::Spotlight => Scalar::Flag(state.spotlight_enabled),
            Field::CameraX => Scalar::Float(state.camera.position.x),
            Field::CameraY => Scalar::Float(state.camera.position.y),
            Field::CameraZ => Scalar::Float(state.camera.position.z),
            Field::FrontX => Scalar::Float(front.x),
            Field::FrontY => Scalar::Float(front.y),
            Field::FrontZ => Scalar::Float(front.z),
            Field::CupX => Scalar::Float(state.cup_position.x),
            Field::CupY => Scalar::Float(state.cup_position.y),
            Field::CupZ => Scalar::Float(state.cup_position.z),
            Field::CupScale => Scalar::Float(state.cup_scale),
        }
    }

    /// Store a parsed scalar. Camera facing is staged in `front` and applied
    /// once decoding ends so yaw and pitch are derived from the whole vector.
    fn write(self, state: &mut ProgramState, front: &mut Vec3, value: Scalar) {
        match (self, value) {
            (Field::Overlay, Scalar::Flag(on)) => {
                state.overlay_enabled = on;
                state.camera_mouse_look = !on;
            }
            (Field::Spotlight, Scalar::Flag(on)) => state.spotlight_enabled = on,
            (field, Scalar::Float(v)) => match field {
                Field::ClearR => state.clear_color.x = v,
                Field::ClearG => state.clear_color.y = v,
                Field::ClearB => state.clear_color.z = v,
                Field::CameraX => state.camera.position.x = v,
                Field::CameraY => state.camera.position.y = v,
                Field::CameraZ => state.camera.position.z = v,
                Field::FrontX => front.x = v,
                Field::FrontY => front.y = v,
                Field::FrontZ => front.z = v,
                Field::CupX => state.cup_position.x = v,
                Field::CupY => state.cup_position.y = v,
                Field::CupZ => state.cup_position.z = v,
                Field::CupScale => state.set_cup_scale(v),
                Field::Overlay | Field::Spotlight => {}
            },
            (_, Scalar::Flag(_)) => {}
        }
    }

    fn parse(self, token: &str) -> Option<Scalar> {
        if self.is_flag() {
            match token {
                "1" | "true" => Some(Scalar::Flag(true)),
                "0" | "false" => Some(Scalar::Flag(false)),
                _ => None,
            }
        } else {
            token
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Scalar::Float)
        }
    }
}

/// Outcome of [`decode_into`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeReport {
    /// Fields successfully read, counted from the start of the file.
    pub fields_read: usize,
    /// First field that could not be read, with the offending token if any.
    pub stopped_at: Option<(&'static str, Option<String>)>,
}

impl DecodeReport {
    pub fn is_complete(&self) -> bool {
        self.stopped_at.is_none()
    }
}

/// Render the persisted part of `state`, one scalar per line.
pub fn encode(state: &ProgramState) -> String {
    let mut out = String::new();
    for field in Field::ORDER {
        match field.read(state) {
            Scalar::Float(v) => {
                let _ = writeln!(out, "{v}");
            }
            Scalar::Flag(on) => {
                let _ = writeln!(out, "{}", u8::from(on));
            }
        }
    }
    out
}

/// Read whitespace-separated scalars from `text` into `state` in file order.
///
/// Reading stops at the first missing or malformed token; every field from
/// that point on keeps its current value.
pub fn decode_into(state: &mut ProgramState, text: &str) -> DecodeReport {
    let mut tokens = text.split_whitespace();
    let mut front = state.camera.front();
    let mut front_touched = false;
    let mut fields_read = 0;
    let mut stopped_at = None;

    for field in Field::ORDER {
        let token = tokens.next();
        let Some(value) = token.and_then(|t| field.parse(t)) else {
            stopped_at = Some((field.name(), token.map(str::to_owned)));
            break;
        };
        field.write(state, &mut front, value);
        front_touched |= matches!(field, Field::FrontX | Field::FrontY | Field::FrontZ);
        fields_read += 1;
    }

    if front_touched {
        state.camera.set_front(front);
    }

    DecodeReport {
        fields_read,
        stopped_at,
    }
}
