//! Spoken status announcements.
//!
//! Speech goes through a local text-to-speech program (espeak-ng by
//! default). Every announcement starts a fresh engine: the voice list is
//! queried, a preferred voice is picked if one exists, and the text is
//! spoken before `announce` returns. Speech is best effort and never fails
//! the caller.

use crate::{Error, Result};
use std::process::{Command, Stdio};

/// Something that can speak a short status line
pub trait Announcer {
    fn announce(&mut self, text: &str) -> Result<()>;
}

impl<A: Announcer + ?Sized> Announcer for &mut A {
    fn announce(&mut self, text: &str) -> Result<()> {
        (**self).announce(text)
    }
}

/// A voice offered by the speech program
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Voice {
    /// Identifier passed back to the program to select this voice
    pub id: String,
    pub name: String,
}

/// Parse the table printed by `espeak-ng --voices`
///
/// Columns are `Pty Language Age/Gender VoiceName File [Other Languages]`.
/// The header and malformed lines are skipped.
pub fn parse_voice_list(output: &str) -> Vec<Voice> {
    output
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 4 || fields[0] == "Pty" {
                return None;
            }
            Some(Voice {
                id: fields[1].to_string(),
                name: fields[3].to_string(),
            })
        })
        .collect()
}

/// First voice whose name mentions "male" or "hindi", ignoring case
///
/// "female" also contains "male" and is accepted.
pub fn select_voice(voices: &[Voice]) -> Option<&Voice> {
    voices.iter().find(|v| {
        let name = v.name.to_lowercase();
        name.contains("male") || name.contains("hindi")
    })
}

/// One configured instance of the speech program
pub struct SpeechEngine {
    program: String,
    rate: u32,
    voice: Option<Voice>,
}

impl SpeechEngine {
    /// Start an engine, choosing a preferred voice when available
    pub fn init(program: &str, rate: u32) -> Self {
        let voice = match list_voices(program) {
            Ok(voices) => select_voice(&voices).cloned(),
            Err(e) => {
                tracing::warn!("Could not list voices from {}: {}", program, e);
                None
            }
        };

        match &voice {
            Some(v) => tracing::debug!("Using voice {} ({})", v.name, v.id),
            None => tracing::debug!("Using default voice"),
        }

        Self {
            program: program.to_string(),
            rate,
            voice,
        }
    }

    pub fn voice(&self) -> Option<&Voice> {
        self.voice.as_ref()
    }

    /// Speak `text` and wait for the program to finish
    pub fn say(&self, text: &str) -> Result<()> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-s").arg(self.rate.to_string());
        if let Some(voice) = &self.voice {
            cmd.arg("-v").arg(&voice.id);
        }
        cmd.arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let status = cmd.status()?;
        if !status.success() {
            return Err(Error::Speech(format!(
                "{} exited with {}",
                self.program, status
            )));
        }
        Ok(())
    }
}

fn list_voices(program: &str) -> Result<Vec<Voice>> {
    let output = Command::new(program)
        .arg("--voices")
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()?;

    if !output.status.success() {
        return Err(Error::Speech(format!(
            "{} --voices exited with {}",
            program, output.status
        )));
    }

    Ok(parse_voice_list(&String::from_utf8_lossy(&output.stdout)))
}

/// Announcer backed by a local speech program
pub struct SpeechAnnouncer {
    program: String,
    rate: u32,
}

impl SpeechAnnouncer {
    pub fn new(program: impl Into<String>, rate: u32) -> Self {
        Self {
            program: program.into(),
            rate,
        }
    }
}

impl Announcer for SpeechAnnouncer {
    fn announce(&mut self, text: &str) -> Result<()> {
        let engine = SpeechEngine::init(&self.program, self.rate);
        if let Err(e) = engine.say(text) {
            tracing::warn!("Speech unavailable ({}), skipping: {:?}", e, text);
        }
        Ok(())
    }
}

/// Announcer that only logs
#[derive(Debug, Default)]
pub struct SilentAnnouncer;

impl Announcer for SilentAnnouncer {
    fn announce(&mut self, text: &str) -> Result<()> {
        tracing::debug!("(muted) {}", text);
        Ok(())
    }
}
