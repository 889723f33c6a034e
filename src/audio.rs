use crate::constants::*;
use supershape_core::FrameOutput;
use web_sys as web;

/// One sustained oscillator per control whose gain follows the control's
/// transition weight.
pub struct ControlVoices {
    pub master_gain: web::GainNode,
    pub voice_gains: Vec<web::GainNode>,
    _oscillators: Vec<web::OscillatorNode>,
}

fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
) -> Result<web::GainNode, ()> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(())
        }
    }
}

pub fn build_control_voices(
    audio_ctx: &web::AudioContext,
    control_count: usize,
) -> Result<ControlVoices, ()> {
    let master_gain = create_gain(audio_ctx, MASTER_GAIN, "Master")?;
    _ = master_gain.connect_with_audio_node(&audio_ctx.destination());

    let mut voice_gains = Vec::with_capacity(control_count);
    let mut oscillators = Vec::with_capacity(control_count);
    for i in 0..control_count {
        let osc = web::OscillatorNode::new(audio_ctx).map_err(|e| {
            log::error!("OscillatorNode error: {:?}", e);
        })?;
        osc.set_type(web::OscillatorType::Sine);
        osc.frequency()
            .set_value(CONTROL_TONES_HZ[i % CONTROL_TONES_HZ.len()]);
        let gain = create_gain(audio_ctx, 0.0, "Voice")?;
        _ = osc.connect_with_audio_node(&gain);
        _ = gain.connect_with_audio_node(&master_gain);
        _ = osc.start();
        voice_gains.push(gain);
        oscillators.push(osc);
    }
    log::info!("[audio] {} control voices ready", voice_gains.len());
    Ok(ControlVoices {
        master_gain,
        voice_gains,
        _oscillators: oscillators,
    })
}

impl ControlVoices {
    /// Follow this frame's transition weights. When housekeeping flags
    /// `release_voices`, near-silent voices are cut to zero.
    pub fn apply(&self, frame: &FrameOutput) {
        for &(id, weight) in &frame.weights {
            let Some(gain) = self.voice_gains.get(id.0) else {
                continue;
            };
            if frame.release_voices && weight < VOICE_RELEASE_FLOOR {
                gain.gain().set_value(0.0);
            } else {
                gain.gain().set_value(weight as f32 * VOICE_LEVEL);
            }
        }
    }
}
