//! Sound cues.
//!
//! Playback is fire-and-forget: the game hands a `Clip` to a `SoundSink`
//! and never waits on it. Overlapping cues are allowed.

/// Named audio clips shipped with the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Clip {
    /// Bullet launch
    Missile,
    /// Enemy hit or player destroyed
    Explosion,
}

impl Clip {
    pub fn name(&self) -> &'static str {
        match self {
            Clip::Missile => "missile",
            Clip::Explosion => "explosion",
        }
    }
}

/// Anything that can play a clip.
pub trait SoundSink {
    fn play(&mut self, clip: Clip);
}

/// Recording sink: collects cues so the frontend can play them after a frame.
impl SoundSink for Vec<Clip> {
    fn play(&mut self, clip: Clip) {
        log::debug!("sound cue: {}", clip.name());
        self.push(clip);
    }
}

/// Sink that drops every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct Muted;

impl SoundSink for Muted {
    fn play(&mut self, _clip: Clip) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_distinct() {
        assert_ne!(Clip::Missile.name(), Clip::Explosion.name());
    }

    #[test]
    fn vec_sink_keeps_order() {
        let mut cues: Vec<Clip> = Vec::new();
        cues.play(Clip::Missile);
        cues.play(Clip::Explosion);
        cues.play(Clip::Missile);
        assert_eq!(cues, vec![Clip::Missile, Clip::Explosion, Clip::Missile]);
    }
}
