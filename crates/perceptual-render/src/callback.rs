//! Receiving progressive render results.

use perceptual_core::Image;

/// Whether a delivered image is a preview or the finished result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterlacingState {
    /// An intermediate interlacing result; more deliveries follow.
    Intermediate,
    /// The final image in full quality; nothing follows.
    Final,
}

/// Receiver of a progressive render.
///
/// A render delivers zero or more [`InterlacingState::Intermediate`] images
/// followed by exactly one [`InterlacingState::Final`] image, unless
/// [`should_abort`](Self::should_abort) returned `true`, in which case the
/// render returns without a final delivery.
///
/// `should_abort` is polled from worker threads while a pass is being
/// computed, hence the `Sync` bound.
pub trait RenderCallback: Sync {
    /// Polled before and during every stage of a render.
    fn should_abort(&self) -> bool {
        false
    }

    /// Receives the image after a pass or post-processing stage.
    fn deliver_interlacing_pass(&mut self, image: &Image, state: InterlacingState);
}

/// A callback that keeps the final image and counts previews.
///
/// Can be told to abort after a given number of deliveries.
///
/// # Example
///
/// ```rust
/// use perceptual_core::{Image, PixelFormat};
/// use perceptual_render::{CollectingCallback, InterlacingState, RenderCallback};
///
/// let mut callback = CollectingCallback::new();
/// let image = Image::new(2, 2, PixelFormat::Argb32Premultiplied);
/// callback.deliver_interlacing_pass(&image, InterlacingState::Intermediate);
/// callback.deliver_interlacing_pass(&image, InterlacingState::Final);
/// assert_eq!(callback.intermediate_count(), 1);
/// assert_eq!(callback.final_image(), Some(&image));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CollectingCallback {
    states: Vec<InterlacingState>,
    last_image: Option<Image>,
    final_image: Option<Image>,
    abort_after: Option<usize>,
}

impl CollectingCallback {
    /// Creates a callback that never aborts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a callback that aborts once `deliveries` images arrived.
    pub fn aborting_after(deliveries: usize) -> Self {
        Self {
            abort_after: Some(deliveries),
            ..Self::default()
        }
    }

    /// States of all deliveries, in order.
    pub fn states(&self) -> &[InterlacingState] {
        &self.states
    }

    /// Number of intermediate deliveries.
    pub fn intermediate_count(&self) -> usize {
        self.states
            .iter()
            .filter(|state| **state == InterlacingState::Intermediate)
            .count()
    }

    /// The most recently delivered image, of either state.
    pub fn last_image(&self) -> Option<&Image> {
        self.last_image.as_ref()
    }

    /// The final image, if the render completed.
    pub fn final_image(&self) -> Option<&Image> {
        self.final_image.as_ref()
    }

    /// Takes the final image out of the callback.
    pub fn into_final_image(self) -> Option<Image> {
        self.final_image
    }
}

impl RenderCallback for CollectingCallback {
    fn should_abort(&self) -> bool {
        self.abort_after
            .is_some_and(|limit| self.states.len() >= limit)
    }

    fn deliver_interlacing_pass(&mut self, image: &Image, state: InterlacingState) {
        self.states.push(state);
        if state == InterlacingState::Final {
            self.final_image = Some(image.clone());
        }
        self.last_image = Some(image.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perceptual_core::PixelFormat;

    #[test]
    fn test_aborting_after() {
        let mut callback = CollectingCallback::aborting_after(2);
        let image = Image::new(1, 1, PixelFormat::Argb32Premultiplied);
        assert!(!callback.should_abort());
        callback.deliver_interlacing_pass(&image, InterlacingState::Intermediate);
        assert!(!callback.should_abort());
        callback.deliver_interlacing_pass(&image, InterlacingState::Intermediate);
        assert!(callback.should_abort());
        assert!(callback.final_image().is_none());
        assert!(callback.last_image().is_some());
    }

    #[test]
    fn test_default_never_aborts() {
        struct Silent;
        impl RenderCallback for Silent {
            fn deliver_interlacing_pass(&mut self, _: &Image, _: InterlacingState) {}
        }
        assert!(!Silent.should_abort());
    }
}
