//! Offline block renderer.
//!
//! [`ProcessingEngine`] plays the role of a plugin host for whole files: it
//! feeds the effect host-sized blocks and delivers parameter automation
//! through the host channel ([`AudioEffect::set_parameter_value`]) exactly at
//! the scheduled frame. A block that straddles an automation point is split
//! there, so changes never land late by up to a block.

use crate::StereoSamples;
use tandist_core::AudioEffect;

/// A host parameter write scheduled at a frame position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutomationPoint {
    /// Frame index at which the write happens (before that frame is processed).
    pub frame: usize,
    /// Parameter index.
    pub param: usize,
    /// Raw value; the effect clamps it.
    pub value: f32,
}

impl AutomationPoint {
    /// Schedule `value` for `param` at `frame`.
    pub fn new(frame: usize, param: usize, value: f32) -> Self {
        Self {
            frame,
            param,
            value,
        }
    }
}

/// Drives an [`AudioEffect`] over a complete stereo buffer.
pub struct ProcessingEngine<E> {
    effect: E,
    block_size: usize,
    automation: Vec<AutomationPoint>,
}

impl<E: AudioEffect> ProcessingEngine<E> {
    /// Wrap `effect`, processing in blocks of `block_size` frames (at least 1).
    pub fn new(effect: E, block_size: usize) -> Self {
        Self {
            effect,
            block_size: block_size.max(1),
            automation: Vec::new(),
        }
    }

    /// The wrapped effect.
    pub fn effect(&self) -> &E {
        &self.effect
    }

    /// Mutable access to the wrapped effect.
    pub fn effect_mut(&mut self) -> &mut E {
        &mut self.effect
    }

    /// Consume the engine, returning the effect.
    pub fn into_effect(self) -> E {
        self.effect
    }

    /// Block size in frames.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Schedule an automation point. Points at the same frame apply in
    /// insertion order.
    pub fn add_automation(&mut self, point: AutomationPoint) {
        let pos = self.automation.partition_point(|p| p.frame <= point.frame);
        self.automation.insert(pos, point);
    }

    /// Scheduled automation, sorted by frame.
    pub fn automation(&self) -> &[AutomationPoint] {
        &self.automation
    }

    /// Process `input` and return the rendered output.
    ///
    /// `on_block` receives the number of frames rendered so far after each
    /// `run` call. Automation scheduled past the end of `input` is not
    /// applied.
    pub fn process_stereo(
        &mut self,
        input: &StereoSamples,
        mut on_block: impl FnMut(usize),
    ) -> StereoSamples {
        let total = input.len().min(input.right.len());
        let mut output = StereoSamples {
            left: vec![0.0; total],
            right: vec![0.0; total],
        };

        let mut next_point = 0;
        let mut pos = 0;
        while pos < total {
            while let Some(point) = self.automation.get(next_point) {
                if point.frame > pos {
                    break;
                }
                self.effect.set_parameter_value(point.param, point.value);
                tracing::debug!(
                    frame = point.frame,
                    param = point.param,
                    value = point.value,
                    applied = self.effect.get_parameter_value(point.param),
                    "automation"
                );
                next_point += 1;
            }

            let mut end = (pos + self.block_size).min(total);
            if let Some(point) = self.automation.get(next_point) {
                end = end.min(point.frame);
            }

            let frames = end - pos;
            self.effect.run(
                &input.left[pos..end],
                &input.right[pos..end],
                &mut output.left[pos..end],
                &mut output.right[pos..end],
                frames,
            );
            pos = end;
            on_block(pos);
        }

        output
    }
}
