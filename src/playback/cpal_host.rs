//! Audio host backed by the system's default cpal output device.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, SampleRate, StreamConfig};

use super::{AudioHost, OutputStream, StreamSpec};
use crate::StereoSignal;
use crate::error::{AudioError, ErrorCode, Operation};

/// The platform's default cpal host.
///
/// `initialize()` acquires the host and `terminate()` releases it.
#[derive(Default)]
pub struct CpalHost {
    host: Option<cpal::Host>,
}

impl CpalHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioHost for CpalHost {
    type Stream = CpalStream;

    fn initialize(&mut self) -> Result<(), AudioError> {
        let host = cpal::default_host();
        log::debug!("using audio host {}", host.id().name());
        self.host = Some(host);
        Ok(())
    }

    fn open_default_stream<S>(
        &mut self,
        spec: &StreamSpec,
        mut source: S,
    ) -> Result<CpalStream, AudioError>
    where
        S: StereoSignal + Send + 'static,
    {
        let host = self.host.as_ref().ok_or_else(|| {
            AudioError::from_code(Operation::OpenStream, ErrorCode::NOT_INITIALIZED)
        })?;
        if spec.input_channels != 0 {
            return Err(AudioError::new(
                Operation::OpenStream,
                ErrorCode::INVALID_CHANNEL_COUNT,
                "input channels are not supported",
            ));
        }

        let device = host.default_output_device().ok_or_else(|| {
            AudioError::new(
                Operation::OpenStream,
                ErrorCode::INVALID_DEVICE,
                "No output device available",
            )
        })?;
        if let Ok(name) = device.name() {
            log::debug!("opening output device {name}");
        }

        let config = StreamConfig {
            channels: spec.output_channels,
            sample_rate: SampleRate(spec.sample_rate),
            buffer_size: BufferSize::Fixed(spec.frames_per_buffer),
        };

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    source.fill_interleaved(data);
                },
                |err| log::error!("audio stream error: {err}"),
                None,
            )
            .map_err(build_error)?;

        // Some backends start playing as soon as the stream is built.
        if let Err(err) = stream.pause() {
            log::debug!("could not hold new stream paused: {err}");
        }

        Ok(CpalStream { stream })
    }

    fn terminate(&mut self) -> Result<(), AudioError> {
        match self.host.take() {
            Some(_) => Ok(()),
            None => Err(AudioError::from_code(
                Operation::Terminate,
                ErrorCode::NOT_INITIALIZED,
            )),
        }
    }
}

/// Output stream opened by a [`CpalHost`].
pub struct CpalStream {
    stream: cpal::Stream,
}

impl OutputStream for CpalStream {
    fn start(&mut self) -> Result<(), AudioError> {
        self.stream
            .play()
            .map_err(|err| match err {
                cpal::PlayStreamError::DeviceNotAvailable => {
                    AudioError::from_code(Operation::StartStream, ErrorCode::DEVICE_UNAVAILABLE)
                }
                other => AudioError::new(
                    Operation::StartStream,
                    ErrorCode::UNANTICIPATED_HOST_ERROR,
                    other.to_string(),
                ),
            })
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        self.stream
            .pause()
            .map_err(|err| match err {
                cpal::PauseStreamError::DeviceNotAvailable => {
                    AudioError::from_code(Operation::StopStream, ErrorCode::DEVICE_UNAVAILABLE)
                }
                other => AudioError::new(
                    Operation::StopStream,
                    ErrorCode::UNANTICIPATED_HOST_ERROR,
                    other.to_string(),
                ),
            })
    }

    fn close(self) -> Result<(), AudioError> {
        drop(self.stream);
        Ok(())
    }
}

fn build_error(err: cpal::BuildStreamError) -> AudioError {
    let code = match &err {
        cpal::BuildStreamError::DeviceNotAvailable => ErrorCode::DEVICE_UNAVAILABLE,
        cpal::BuildStreamError::StreamConfigNotSupported => ErrorCode::UNSUPPORTED_STREAM_CONFIG,
        cpal::BuildStreamError::InvalidArgument => ErrorCode::INVALID_ARGUMENT,
        _ => ErrorCode::UNANTICIPATED_HOST_ERROR,
    };
    AudioError::new(Operation::OpenStream, code, err.to_string())
}
