use glam::{Mat4, Quat, Vec3};

use super::model::{world_matrices, ModelNode, Transform};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    Step,
    Linear,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChannelValues {
    Translation(Vec<Vec3>),
    Rotation(Vec<Quat>),
    Scale(Vec<Vec3>),
}

/// Keyframes driving one property of one node
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub node: usize,
    pub times: Vec<f32>,
    pub values: ChannelValues,
    pub interpolation: Interpolation,
}

impl Channel {
    /// Keyframe pair bracketing `time` and the blend factor between them
    fn keys(&self, time: f32) -> (usize, usize, f32) {
        let last = self.times.len().saturating_sub(1);
        let next = self.times.partition_point(|&t| t <= time);
        if next == 0 {
            return (0, 0, 0.0);
        }
        if next > last {
            return (last, last, 0.0);
        }
        let prev = next - 1;
        let span = self.times[next] - self.times[prev];
        let factor = if span > 0.0 { (time - self.times[prev]) / span } else { 0.0 };
        match self.interpolation {
            Interpolation::Step => (prev, prev, 0.0),
            Interpolation::Linear => (prev, next, factor),
        }
    }

    /// Writes the sampled value into the node's local transform
    pub fn apply(&self, time: f32, pose: &mut [Transform]) {
        if self.times.is_empty() {
            return;
        }
        let Some(target) = pose.get_mut(self.node) else {
            return;
        };
        let (a, b, t) = self.keys(time);
        match &self.values {
            ChannelValues::Translation(v) if b < v.len() => {
                target.translation = v[a].lerp(v[b], t);
            }
            ChannelValues::Rotation(v) if b < v.len() => {
                target.rotation = v[a].slerp(v[b], t).normalize();
            }
            ChannelValues::Scale(v) if b < v.len() => {
                target.scale = v[a].lerp(v[b], t);
            }
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    pub channels: Vec<Channel>,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, channels: Vec<Channel>) -> Self {
        let duration = channels
            .iter()
            .filter_map(|c| c.times.last().copied())
            .fold(0.0f32, f32::max);
        Self {
            name: name.into(),
            duration,
            channels,
        }
    }
}

/// Plays every clip of a model on a loop
///
/// Clips are applied in order; a later clip overrides an earlier one on the
/// same node property.
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    clips: Vec<AnimationClip>,
    time: f32,
}

impl AnimationPlayer {
    pub fn new(clips: Vec<AnimationClip>) -> Self {
        Self { clips, time: 0.0 }
    }

    /// Advance playback by wall-clock seconds
    pub fn advance(&mut self, delta: f32) {
        self.time += delta.max(0.0);
    }

    /// Local transforms for the current time
    pub fn pose(&self, nodes: &[ModelNode]) -> Vec<Transform> {
        let mut pose: Vec<Transform> = nodes.iter().map(|n| n.rest).collect();
        for clip in &self.clips {
            let local_time = if clip.duration > 0.0 { self.time % clip.duration } else { 0.0 };
            for channel in &clip.channels {
                channel.apply(local_time, &mut pose);
            }
        }
        pose
    }

    pub fn world_matrices(&self, nodes: &[ModelNode]) -> Vec<Mat4> {
        world_matrices(nodes, &self.pose(nodes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide_clip(interpolation: Interpolation) -> AnimationClip {
        AnimationClip::new(
            "slide",
            vec![Channel {
                node: 0,
                times: vec![0.0, 1.0, 2.0],
                values: ChannelValues::Translation(vec![
                    Vec3::ZERO,
                    Vec3::new(2.0, 0.0, 0.0),
                    Vec3::ZERO,
                ]),
                interpolation,
            }],
        )
    }

    fn nodes() -> Vec<ModelNode> {
        vec![ModelNode::root("root")]
    }

    #[test]
    fn clip_duration_is_last_keyframe() {
        assert_eq!(slide_clip(Interpolation::Linear).duration, 2.0);
    }

    #[test]
    fn linear_interpolates_between_keys() {
        let mut player = AnimationPlayer::new(vec![slide_clip(Interpolation::Linear)]);
        player.advance(0.5);
        let pose = player.pose(&nodes());
        assert!((pose[0].translation.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn step_holds_previous_key() {
        let mut player = AnimationPlayer::new(vec![slide_clip(Interpolation::Step)]);
        player.advance(0.9);
        let pose = player.pose(&nodes());
        assert_eq!(pose[0].translation, Vec3::ZERO);
    }

    #[test]
    fn playback_loops() {
        let mut player = AnimationPlayer::new(vec![slide_clip(Interpolation::Linear)]);
        player.advance(2.5);
        let pose = player.pose(&nodes());
        assert!((pose[0].translation.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn channel_for_unknown_node_is_ignored() {
        let mut clip = slide_clip(Interpolation::Linear);
        clip.channels[0].node = 7;
        let player = AnimationPlayer::new(vec![clip]);
        assert_eq!(player.pose(&nodes())[0], Transform::IDENTITY);
    }
}
