//! DOM-free view model for the carousel.
//!
//! Holds what a rendering layer needs to draw the carousel: slide layout,
//! frame offset, transition flag, active dot and control visibility. It only
//! ever changes by applying [`ViewUpdate`]s emitted by the position machine.

use std::time::Duration;

use crate::config::{CarouselConfiguration, LinkTarget, ShowPolicy};
use crate::events::ViewUpdate;
use crate::sequence::SlideSequence;

/// Built-in chevron paths on a 24x24 grid.
const CHEVRON_LEFT: &str = "M15.41 7.41L14 6l-6 6 6 6 1.41-1.41L10.83 12l4.58-4.59z";
const CHEVRON_RIGHT: &str = "M10 6L8.59 7.41 13.17 12l-4.58 4.59L10 18l6-6-6-6z";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrowIcon {
    /// Custom image URL.
    Image(String),
    /// Built-in SVG path.
    Chevron(&'static str),
}

impl ArrowIcon {
    fn resolve(image: Option<&str>, fallback: &'static str) -> Self {
        match image {
            Some(url) if !url.is_empty() => Self::Image(url.to_string()),
            _ => Self::Chevron(fallback),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideLayout {
    pub url: String,
    /// Link wrapping the image, with the browsing context to open it in.
    pub link: Option<(String, LinkTarget)>,
    pub left_px: i64,
    pub width_px: u32,
}

#[derive(Debug, Clone)]
pub struct ViewModel {
    sequence: SlideSequence,
    width: u32,
    height: u32,
    target: LinkTarget,
    transition: Duration,
    show_buttons: ShowPolicy,
    show_dots: ShowPolicy,
    draggable: bool,
    left_icon: ArrowIcon,
    right_icon: ArrowIcon,
    active_dot: usize,
    frame_slot: usize,
    transition_enabled: bool,
}

impl ViewModel {
    pub fn new(config: &CarouselConfiguration) -> Self {
        let sequence = SlideSequence::build(&config.images);
        let frame_slot = sequence.frame_slot(sequence.canonical_slot(0));
        Self {
            width: config.viewport.width,
            height: config.viewport.height,
            target: config.target,
            transition: config.transition_duration,
            show_buttons: config.show_buttons,
            show_dots: config.show_dots,
            draggable: config.draggable,
            left_icon: ArrowIcon::resolve(config.left_button_image.as_deref(), CHEVRON_LEFT),
            right_icon: ArrowIcon::resolve(config.right_button_image.as_deref(), CHEVRON_RIGHT),
            active_dot: 0,
            frame_slot,
            transition_enabled: true,
            sequence,
        }
    }

    pub fn apply(&mut self, update: ViewUpdate) {
        self.active_dot = update.index;
        self.transition_enabled = update.animated;
        self.frame_slot = self.sequence.frame_slot(update.offset_slots);
    }

    /// Horizontal position of the slide strip relative to the viewport.
    pub fn frame_left_px(&self) -> i64 {
        -(self.frame_slot as i64 * i64::from(self.width))
    }

    pub fn track_width_px(&self) -> u64 {
        self.sequence.len() as u64 * u64::from(self.width)
    }

    pub fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Transition to apply to the next frame change; `None` means snap.
    pub fn transition(&self) -> Option<Duration> {
        self.transition_enabled.then_some(self.transition)
    }

    pub fn slides(&self) -> Vec<SlideLayout> {
        self.sequence
            .iter()
            .enumerate()
            .map(|(slot, item)| SlideLayout {
                url: item.url.clone(),
                link: item.href.clone().map(|href| (href, self.target)),
                left_px: slot as i64 * i64::from(self.width),
                width_px: self.width,
            })
            .collect()
    }

    /// URL of the image currently framed, if any.
    pub fn current_url(&self) -> Option<&str> {
        self.sequence.get(self.frame_slot).map(|s| s.url.as_str())
    }

    pub fn dot_count(&self) -> usize {
        if self.show_dots.is_rendered() {
            self.sequence.image_count()
        } else {
            0
        }
    }

    pub fn active_dot(&self) -> usize {
        self.active_dot
    }

    pub fn buttons_visible(&self, hovered: bool) -> bool {
        self.show_buttons.is_visible(hovered)
    }

    pub fn dots_visible(&self, hovered: bool) -> bool {
        self.show_dots.is_visible(hovered)
    }

    pub fn suppress_drag(&self) -> bool {
        !self.draggable
    }

    pub fn arrow_icons(&self) -> (&ArrowIcon, &ArrowIcon) {
        (&self.left_icon, &self.right_icon)
    }
}
