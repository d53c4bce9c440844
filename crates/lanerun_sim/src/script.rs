//! Scripted input timeline.
//!
//! A script is a whitespace-separated list of `FRAME:ACTION` events:
//!
//! ```text
//! 10:left 40:right 60:look=12,-4 90:zoom=25 120:rig=first_person 200:reset
//! ```
//!
//! Several events may share a frame; their inputs are merged.

use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use lanerun_core::{InputSnapshot, RigMode};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Left,
    Right,
    Look { dx: f32, dy: f32 },
    Zoom(f32),
    Rig(RigMode),
    Reset,
}

/// Everything scheduled for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameEvents {
    pub input: InputSnapshot,
    pub zoom: Option<f32>,
    pub rig: Option<RigMode>,
    pub reset: bool,
}

impl FrameEvents {
    fn push(&mut self, action: Action) {
        match action {
            Action::Left => self.input.move_left = true,
            Action::Right => self.input.move_right = true,
            Action::Look { dx, dy } => {
                self.input.pointer_dx += dx;
                self.input.pointer_dy += dy;
            }
            Action::Zoom(d) => self.zoom = Some(d),
            Action::Rig(r) => self.rig = Some(r),
            Action::Reset => self.reset = true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    events: BTreeMap<u64, FrameEvents>,
}

impl Script {
    pub fn parse(text: &str) -> Result<Self> {
        let mut events: BTreeMap<u64, FrameEvents> = BTreeMap::new();
        for token in text.split_whitespace() {
            let (frame, action) = parse_event(token)
                .with_context(|| format!("bad script event `{token}`"))?;
            events.entry(frame).or_default().push(action);
        }
        Ok(Self { events })
    }

    pub fn at(&self, frame: u64) -> FrameEvents {
        self.events.get(&frame).copied().unwrap_or_default()
    }

    /// Last frame with an event, if any.
    pub fn last_frame(&self) -> Option<u64> {
        self.events.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

fn parse_event(token: &str) -> Result<(u64, Action)> {
    let Some((frame, action)) = token.split_once(':') else {
        bail!("expected FRAME:ACTION");
    };
    let frame = frame.parse::<u64>().context("frame is not a number")?;
    Ok((frame, parse_action(action)?))
}

fn parse_action(text: &str) -> Result<Action> {
    let (name, arg) = match text.split_once('=') {
        Some((n, a)) => (n, Some(a)),
        None => (text, None),
    };
    match (name, arg) {
        ("left", None) => Ok(Action::Left),
        ("right", None) => Ok(Action::Right),
        ("reset", None) => Ok(Action::Reset),
        ("look", Some(arg)) => {
            let (dx, dy) = arg.split_once(',').context("look needs DX,DY")?;
            Ok(Action::Look { dx: parse_finite(dx)?, dy: parse_finite(dy)? })
        }
        ("zoom", Some(arg)) => Ok(Action::Zoom(parse_finite(arg)?)),
        ("rig", Some(arg)) => Ok(Action::Rig(parse_rig(arg)?)),
        _ => bail!("unknown action `{text}`"),
    }
}

fn parse_rig(text: &str) -> Result<RigMode> {
    match text {
        "third_person" => Ok(RigMode::ThirdPerson),
        "first_person" => Ok(RigMode::FirstPerson),
        "cinematic" => Ok(RigMode::Cinematic),
        other => bail!("unknown camera rig `{other}`"),
    }
}

fn parse_finite(text: &str) -> Result<f32> {
    let v: f32 = text.trim().parse().with_context(|| format!("`{text}` is not a number"))?;
    if !v.is_finite() {
        bail!("`{text}` is not finite");
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_timeline() {
        let s = Script::parse("10:left 40:right\n60:look=12,-4 90:zoom=25 120:rig=cinematic 200:reset")
            .unwrap();
        assert_eq!(s.len(), 6);
        assert_eq!(s.at(120).rig, Some(RigMode::Cinematic));
        assert_eq!(s.at(10).input, InputSnapshot::left());
        assert_eq!(s.at(40).input, InputSnapshot::right());
        assert_eq!(s.at(60).input, InputSnapshot::look(12.0, -4.0));
        assert_eq!(s.at(90).zoom, Some(25.0));
        assert!(s.at(200).reset);
        assert_eq!(s.at(11), FrameEvents::default());
        assert_eq!(s.last_frame(), Some(200));
    }

    #[test]
    fn events_on_the_same_frame_merge() {
        let s = Script::parse("5:left 5:right 5:look=1,1 5:look=2,0").unwrap();
        let ev = s.at(5);
        assert!(ev.input.move_left && ev.input.move_right);
        assert_eq!(ev.input.pointer_dx, 3.0);
        assert_eq!(ev.input.pointer_dy, 1.0);
    }

    #[test]
    fn rejects_malformed_events() {
        for bad in [
            "left", "x:left", "3:jump", "3:look=1", "3:zoom=abc", "3:zoom=inf", "3:left=1", "3:rig=drone",
        ] {
            assert!(Script::parse(bad).is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn empty_script_is_fine() {
        let s = Script::parse("  ").unwrap();
        assert!(s.is_empty());
        assert_eq!(s.last_frame(), None);
    }
}
