//! Alert tone playback
//!
//! Renders the [`ToneEnvelope`] to WAV and pipes it into a command-line audio
//! player (`aplay`, `paplay`). The player is spawned synchronously so a
//! missing binary surfaces as an error; feeding samples and waiting happen
//! on a background thread. Once no player can be started the notifier falls
//! back to the terminal bell for the rest of the session.

use std::io::Write;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};

use super::bell::BellNotifier;
use super::tone::{ToneEnvelope, DEFAULT_SAMPLE_RATE};
use crate::domain::Alert;
use crate::ports::{Notifier, NotifyError};

/// Program and arguments for a player that reads a WAV file on stdin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl PlayerCommand {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// ALSA first, then PulseAudio / PipeWire
    pub fn defaults() -> Vec<Self> {
        vec![Self::new("aplay", &["-q", "-"]), Self::new("paplay", &[])]
    }

    fn spawn(&self) -> std::io::Result<Child> {
        Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
    }
}

pub struct ToneNotifier {
    tone: ToneEnvelope,
    wav: Vec<u8>,
    players: Vec<PlayerCommand>,
    fallback: BellNotifier,
    unavailable: AtomicBool,
}

impl Default for ToneNotifier {
    fn default() -> Self {
        Self::new(ToneEnvelope::default(), PlayerCommand::defaults())
    }
}

impl ToneNotifier {
    pub fn new(tone: ToneEnvelope, players: Vec<PlayerCommand>) -> Self {
        Self {
            wav: tone.to_wav(DEFAULT_SAMPLE_RATE),
            tone,
            players,
            fallback: BellNotifier::new(tone),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn tone(&self) -> &ToneEnvelope {
        &self.tone
    }

    /// True once every player failed to start and the bell took over
    pub fn using_fallback(&self) -> bool {
        self.unavailable.load(Ordering::Relaxed)
    }

    fn start_player(&self) -> Result<(Child, &PlayerCommand), NotifyError> {
        let mut failures = Vec::new();
        for player in &self.players {
            match player.spawn() {
                Ok(child) => return Ok((child, player)),
                Err(e) => failures.push(format!("{}: {}", player.program, e)),
            }
        }
        if failures.is_empty() {
            failures.push("no player configured".to_string());
        }
        Err(NotifyError::AudioUnavailable(failures.join("; ")))
    }
}

impl Notifier for ToneNotifier {
    fn name(&self) -> &'static str {
        "tone"
    }

    fn notify(&self, alert: &Alert) -> Result<(), NotifyError> {
        if self.using_fallback() {
            return self.fallback.notify(alert);
        }

        let (mut child, player) = match self.start_player() {
            Ok(started) => started,
            Err(e) => {
                self.unavailable.store(true, Ordering::Relaxed);
                self.fallback.notify(alert)?;
                return Err(e);
            }
        };

        let wav = self.wav.clone();
        let program = player.program.clone();
        std::thread::Builder::new()
            .name("alert-tone".to_string())
            .spawn(move || {
                if let Some(mut stdin) = child.stdin.take() {
                    if let Err(e) = stdin.write_all(&wav) {
                        tracing::debug!("Writing tone to {} failed: {}", program, e);
                    }
                }
                match child.wait() {
                    Ok(status) if !status.success() => {
                        tracing::debug!("{} exited with {}", program, status);
                    }
                    Err(e) => tracing::debug!("Waiting on {} failed: {}", program, e),
                    _ => {}
                }
            })?;
        Ok(())
    }
}
