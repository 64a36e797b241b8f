use std::slice;

/// One displayable image and its optional link target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideItem {
    pub url: String,
    pub href: Option<String>,
}

impl SlideItem {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            href: None,
        }
    }

    /// Empty links are treated as no link at all.
    pub fn linked(url: impl Into<String>, href: impl Into<String>) -> Self {
        let href = href.into();
        Self {
            url: url.into(),
            href: (!href.is_empty()).then_some(href),
        }
    }
}

/// The physical slide strip used for seamless looping.
///
/// With more than one image the strip is padded with the last image in
/// front and the first image at the end, so a move across either boundary
/// always lands on a pixel-identical copy of its neighbour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideSequence {
    slides: Vec<SlideItem>,
    image_count: usize,
}

impl SlideSequence {
    pub fn build(images: &[SlideItem]) -> Self {
        let image_count = images.len();
        let slides = match images {
            [first, .., last] => {
                let mut slides = Vec::with_capacity(image_count + 2);
                slides.push(last.clone());
                slides.extend_from_slice(images);
                slides.push(first.clone());
                slides
            }
            _ => images.to_vec(),
        };
        Self {
            slides,
            image_count,
        }
    }

    /// Number of physical slides.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Number of real images, `n`.
    pub fn image_count(&self) -> usize {
        self.image_count
    }

    /// Wrap-around navigation is only possible with padding in place.
    pub fn is_looping(&self) -> bool {
        self.image_count > 1
    }

    pub fn get(&self, slot: usize) -> Option<&SlideItem> {
        self.slides.get(slot)
    }

    pub fn iter(&self) -> slice::Iter<'_, SlideItem> {
        self.slides.iter()
    }

    /// Resting frame offset for a logical index.
    pub fn canonical_slot(&self, index: usize) -> usize {
        index + 1
    }

    /// Physical slot shown when the frame is shifted by `offset_slots`.
    ///
    /// Unpadded sequences hold at most one slide, which sits at the origin.
    pub fn frame_slot(&self, offset_slots: usize) -> usize {
        if self.is_looping() { offset_slots } else { 0 }
    }
}

impl<'a> IntoIterator for &'a SlideSequence {
    type Item = &'a SlideItem;
    type IntoIter = slice::Iter<'a, SlideItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
