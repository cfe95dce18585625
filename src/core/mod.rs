pub mod analysis;
pub mod composer;
pub mod lexicon;
pub mod prosody;
pub mod quality;
pub mod synth;
pub mod template;
