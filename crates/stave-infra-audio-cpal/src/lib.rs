use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SampleFormat;
use parking_lot::Mutex;
use stave_ports::audio::{AudioError, AudioSink};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const AMPLITUDE: f32 = 0.25;

#[derive(Debug)]
struct ToneState {
    frequency_hz: f32,
    gate: bool,
    phase: f32,
}

/// Square-wave tone generator on the default output device. The cpal
/// stream lives on its own thread (streams are not `Send`); the sink
/// only flips the oscillator gate and sleeps for the requested
/// duration, which gives the blocking contract the core expects.
pub struct CpalToneSink {
    state: Arc<Mutex<ToneState>>,
    stop_tx: mpsc::Sender<()>,
    join_handle: Option<thread::JoinHandle<()>>,
}

impl CpalToneSink {
    pub fn new() -> Result<Self, AudioError> {
        let state = Arc::new(Mutex::new(ToneState {
            frequency_hz: 0.0,
            gate: false,
            phase: 0.0,
        }));

        let (stop_tx, stop_rx) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::channel();
        let thread_state = state.clone();
        let join_handle = thread::spawn(move || run_stream(thread_state, stop_rx, ready_tx));

        ready_rx
            .recv()
            .map_err(|_| AudioError::Backend("audio thread died during setup".to_string()))??;

        Ok(Self {
            state,
            stop_tx,
            join_handle: Some(join_handle),
        })
    }
}

impl AudioSink for CpalToneSink {
    fn tone(&self, frequency_hz: f32, duration_ms: u32) -> Result<(), AudioError> {
        {
            let mut state = self.state.lock();
            state.frequency_hz = frequency_hz;
            state.gate = true;
        }
        thread::sleep(Duration::from_millis(duration_ms as u64));
        self.state.lock().gate = false;
        Ok(())
    }

    fn silence(&self, duration_ms: u32) -> Result<(), AudioError> {
        thread::sleep(Duration::from_millis(duration_ms as u64));
        Ok(())
    }
}

impl Drop for CpalToneSink {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(());
        if let Some(handle) = self.join_handle.take() {
            let _ = handle.join();
        }
    }
}

fn run_stream(
    state: Arc<Mutex<ToneState>>,
    stop_rx: mpsc::Receiver<()>,
    ready_tx: mpsc::Sender<Result<(), AudioError>>,
) {
    let stream = match open_stream(state) {
        Ok(stream) => stream,
        Err(e) => {
            let _ = ready_tx.send(Err(e));
            return;
        }
    };

    if let Err(e) = stream.play() {
        let _ = ready_tx.send(Err(AudioError::Backend(e.to_string())));
        return;
    }

    let _ = ready_tx.send(Ok(()));
    // Block until the sink is dropped; the stream dies with this thread.
    let _ = stop_rx.recv();
}

fn open_stream(state: Arc<Mutex<ToneState>>) -> Result<cpal::Stream, AudioError> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| AudioError::Backend("no default output device".to_string()))?;
    let config = device
        .default_output_config()
        .map_err(|e| AudioError::Backend(e.to_string()))?;

    if config.sample_format() != SampleFormat::F32 {
        return Err(AudioError::Backend(format!(
            "unsupported sample format {:?}",
            config.sample_format()
        )));
    }

    let sample_rate_hz = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;

    device
        .build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| fill_square(data, channels, sample_rate_hz, &state),
            |e| log::warn!("audio stream error: {e}"),
            None,
        )
        .map_err(|e| AudioError::Backend(e.to_string()))
}

fn fill_square(data: &mut [f32], channels: usize, sample_rate_hz: f32, state: &Mutex<ToneState>) {
    let mut state = state.lock();
    for frame in data.chunks_mut(channels) {
        let sample = if state.gate && state.frequency_hz > 0.0 {
            state.phase += state.frequency_hz / sample_rate_hz;
            if state.phase >= 1.0 {
                state.phase -= 1.0;
            }
            if state.phase < 0.5 {
                AMPLITUDE
            } else {
                -AMPLITUDE
            }
        } else {
            0.0
        };
        for out in frame {
            *out = sample;
        }
    }
}
