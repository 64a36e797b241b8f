use std::fmt;
use std::path::Path;
use std::time::Duration;

use anyhow::{Result, ensure};
use serde::{Deserialize, Deserializer};

use crate::error::Error;
use crate::sequence::SlideItem;

/// When an overlay control (arrows or dots) is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShowPolicy {
    #[default]
    Always,
    Hover,
    Never,
}

impl ShowPolicy {
    pub fn is_visible(self, hovered: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Hover => hovered,
            Self::Never => false,
        }
    }

    /// Controls with `never` are not created, so they cannot be hovered.
    pub fn is_rendered(self) -> bool {
        self != Self::Never
    }
}

/// Browsing context a linked slide opens in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum LinkTarget {
    #[default]
    #[serde(rename = "_self")]
    SameFrame,
    #[serde(rename = "_blank")]
    Blank,
    #[serde(rename = "_parent")]
    Parent,
    #[serde(rename = "_top")]
    Top,
}

impl LinkTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SameFrame => "_self",
            Self::Blank => "_blank",
            Self::Parent => "_parent",
            Self::Top => "_top",
        }
    }
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host container geometry in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// An image entry: either a bare URL or a map with an optional link.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ImageSource {
    Url(String),
    Linked {
        #[serde(default)]
        url: String,
        #[serde(default)]
        href: Option<String>,
    },
}

impl From<ImageSource> for SlideItem {
    fn from(source: ImageSource) -> Self {
        match source {
            ImageSource::Url(url) => SlideItem::new(url),
            ImageSource::Linked { url, href } => SlideItem::linked(url, href.unwrap_or_default()),
        }
    }
}

/// User-facing carousel options as read from YAML.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Configuration {
    /// Images to cycle, unless the host supplies its own.
    pub images: Vec<ImageSource>,
    /// Autoplay period. Accepts milliseconds or a humantime string.
    #[serde(deserialize_with = "millis_or_humantime")]
    pub interval: Duration,
    /// Start autoplay when the carousel is created.
    pub autoplay: bool,
    /// Slide animation length; also the arrow throttle window and snap delay.
    #[serde(deserialize_with = "millis_or_humantime")]
    pub duration: Duration,
    pub target: LinkTarget,
    /// When false, image drag-start is suppressed.
    pub draggable: bool,
    pub show_buttons: ShowPolicy,
    pub show_dots: ShowPolicy,
    /// Suspend autoplay while the pointer rests on an arrow or the dots.
    pub stop_on_mouseover: bool,
    pub left_button_image: Option<String>,
    pub right_button_image: Option<String>,
    /// Apply the arrow throttle to dot clicks as well.
    pub throttle_dots: bool,
    pub viewport: Option<Viewport>,
}

fn millis_or_humantime<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(u64),
        Text(#[serde(with = "humantime_serde")] Duration),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Millis(ms) => Duration::from_millis(ms),
        Raw::Text(d) => d,
    })
}

impl Configuration {
    const fn default_interval() -> Duration {
        Duration::from_millis(5000)
    }

    const fn default_duration() -> Duration {
        Duration::from_millis(1000)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let s = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&s)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(self) -> Result<Self> {
        ensure!(!self.interval.is_zero(), "interval must be greater than zero");
        ensure!(!self.duration.is_zero(), "duration must be greater than zero");
        if let Some(Viewport { width, height }) = self.viewport {
            ensure!(
                width > 0 && height > 0,
                "viewport must have a positive width and height"
            );
        }
        Ok(self)
    }

    /// Merge these options with what the host provides.
    ///
    /// Images already present in the host take precedence over configured
    /// ones. Host geometry wins over the configured viewport; without either
    /// the carousel cannot be laid out.
    pub fn resolve(
        self,
        host_images: Vec<SlideItem>,
        host_viewport: Option<Viewport>,
    ) -> Result<CarouselConfiguration, Error> {
        let viewport = host_viewport
            .or(self.viewport)
            .ok_or(Error::MissingViewport)?;
        if viewport.width == 0 || viewport.height == 0 {
            return Err(Error::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let images = if host_images.is_empty() {
            self.images.into_iter().map(SlideItem::from).collect()
        } else {
            host_images
        };

        Ok(CarouselConfiguration {
            images,
            viewport,
            interval: self.interval,
            autoplay: self.autoplay,
            transition_duration: self.duration,
            stop_on_hover: self.stop_on_mouseover,
            target: self.target,
            draggable: self.draggable,
            show_buttons: self.show_buttons,
            show_dots: self.show_dots,
            left_button_image: self.left_button_image,
            right_button_image: self.right_button_image,
            throttle_dots: self.throttle_dots,
        })
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            interval: Self::default_interval(),
            autoplay: true,
            duration: Self::default_duration(),
            target: LinkTarget::default(),
            draggable: true,
            show_buttons: ShowPolicy::default(),
            show_dots: ShowPolicy::default(),
            stop_on_mouseover: true,
            left_button_image: None,
            right_button_image: None,
            throttle_dots: false,
            viewport: None,
        }
    }
}

/// Resolved settings for one carousel instance. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct CarouselConfiguration {
    pub images: Vec<SlideItem>,
    pub viewport: Viewport,
    pub interval: Duration,
    pub autoplay: bool,
    /// Single source for the slide animation, the snap delay and the
    /// arrow throttle window.
    pub transition_duration: Duration,
    pub stop_on_hover: bool,
    pub target: LinkTarget,
    pub draggable: bool,
    pub show_buttons: ShowPolicy,
    pub show_dots: ShowPolicy,
    pub left_button_image: Option<String>,
    pub right_button_image: Option<String>,
    pub throttle_dots: bool,
}

impl CarouselConfiguration {
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Slide-width in pixels.
    pub fn slide_width(&self) -> u32 {
        self.viewport.width
    }
}
