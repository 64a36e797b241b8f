use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Navigation requests arriving from the view boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselCommand {
    /// Right arrow.
    Next,
    /// Left arrow.
    Prev,
    /// Dot click.
    JumpTo(usize),
    /// Pointer entered an arrow or the dot strip.
    HoverEnter,
    /// Pointer left an arrow or the dot strip.
    HoverExit,
}

impl FromStr for CarouselCommand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let verb = parts.next().unwrap_or_default().to_ascii_lowercase();
        let cmd = match verb.as_str() {
            "next" | "n" => Self::Next,
            "prev" | "p" => Self::Prev,
            "enter" => Self::HoverEnter,
            "leave" => Self::HoverExit,
            "jump" | "j" => {
                let raw = parts.next().unwrap_or_default();
                let index = raw
                    .parse::<usize>()
                    .map_err(|_| Error::InvalidIndex(raw.to_string()))?;
                Self::JumpTo(index)
            }
            _ => return Err(Error::UnknownCommand(s.trim().to_string())),
        };
        if let Some(extra) = parts.next() {
            return Err(Error::UnknownCommand(format!("{} {extra}", verb)));
        }
        Ok(cmd)
    }
}

/// Emitted by the position state machine whenever the frame moves.
///
/// `offset_slots` counts slide-widths the frame is shifted left from the
/// origin of the padded sequence; `animated` tells the view whether to
/// apply the change with the transition enabled or as an instant snap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewUpdate {
    pub index: usize,
    pub offset_slots: usize,
    pub animated: bool,
}
