use crate::synth::voice::Voice;

/// Factory for creating voices with a specific patch/sound design
///
/// This is the "instrument design" layer - you configure your sound once,
/// then the pool calls the factory once per slot at construction time.
/// Nothing is built after that.
pub trait VoiceFactory {
    type Voice: Voice;

    fn create_voice(&self) -> Self::Voice;
}

impl<F, T> VoiceFactory for F
where
    F: Fn() -> T,
    T: Voice,
{
    type Voice = T;

    fn create_voice(&self) -> Self::Voice {
        self()
    }
}
