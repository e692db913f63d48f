//! Spectrum-analyser style bars driven by a sine sweep plus noise.
//!
//! Bars ease towards their targets at a rate proportional to the gap, so
//! they rise quickly and settle smoothly.

use rand::rngs::StdRng;
use rand::Rng;

use crate::core::{Effect, EffectError, EffectMetadata, Simulation, SimulationEffect, Surface};
use crate::types::{palette, CellStyle, Rgb};

const ID: &str = "audio-visualizer";

const COLORS: [Rgb; 4] = [palette::GREEN, palette::YELLOW, palette::ORANGE, palette::RED];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub bars: usize,
    /// Easing rate per second.
    pub easing: f64,
    pub fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bars: 40,
            easing: 5.0,
            fps: 30,
        }
    }
}

pub struct AudioVisualizer {
    config: Config,
    width: u16,
    height: u16,
    /// Current heights as a fraction of the screen height.
    heights: Vec<f64>,
    targets: Vec<f64>,
    time: f64,
    rng: StdRng,
}

impl AudioVisualizer {
    pub fn new(width: u16, height: u16, config: Config, mut rng: StdRng) -> Self {
        let targets = (0..config.bars).map(|_| rng.random::<f64>()).collect();
        Self {
            heights: vec![0.0; config.bars],
            targets,
            config,
            width,
            height,
            time: 0.0,
            rng,
        }
    }

    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Targets are redrawn during the first tenth of every half second.
    fn retarget_window(&self) -> bool {
        (self.time * 10.0) as u64 % 5 == 0
    }

    fn retarget(&mut self) {
        let t = self.time;
        for (i, target) in self.targets.iter_mut().enumerate() {
            let sweep = ((i as f64 * 0.2 + t * 2.0).sin() + 1.0) / 2.0;
            let noise = self.rng.random::<f64>() * 0.5;
            *target = sweep * 0.7 + noise * 0.3;
        }
    }

    fn bar_color(&self, dy: usize) -> Rgb {
        let idx = dy * COLORS.len() / self.height.max(1) as usize;
        COLORS[idx.min(COLORS.len() - 1)]
    }
}

impl Simulation for AudioVisualizer {
    fn update(&mut self, dt: f64) {
        self.time += dt;
        if self.retarget_window() {
            self.retarget();
        }
        let rate = dt * self.config.easing;
        for (h, t) in self.heights.iter_mut().zip(&self.targets) {
            *h += (t - *h) * rate;
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        let bars = self.heights.len().max(1);
        let bar_w = (self.width as usize / bars).max(1);
        let height = self.height as i32;
        for (i, h) in self.heights.iter().enumerate() {
            let x = (i * bar_w) as i32;
            let rows = (h * self.height as f64) as i32;
            for dy in 0..rows {
                let style = CellStyle::fg(self.bar_color(dy as usize));
                for dx in 0..bar_w as i32 {
                    surface.set_cell(x + dx, height - 1 - dy, '█', style);
                }
            }
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }
}

pub fn metadata() -> EffectMetadata {
    EffectMetadata::new(ID, "音频可视化", "Audio Visualizer")
        .description("模拟音频频谱的跳动柱状图", "Simulated audio spectrum with bouncing bars")
        .long_description("四十根频谱柱随正弦扫频和随机噪声跳动，平滑缓动到目标高度，由低到高从绿变红。")
        .tags(&["音乐", "动画", "多彩"])
}

pub fn effect_with(config: Config) -> SimulationEffect<AudioVisualizer> {
    SimulationEffect::new(metadata(), config.fps, move |w, h| {
        if w == 0 || h == 0 {
            return Err(EffectError::surface_too_small(w, h, 1, 1));
        }
        Ok(AudioVisualizer::new(w, h, config, crate::os_rng()))
    })
}

pub fn effect() -> Box<dyn Effect> {
    Box::new(effect_with(Config::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FrameBuffer;
    use rand::SeedableRng;

    fn visualizer() -> AudioVisualizer {
        AudioVisualizer::new(80, 20, Config::default(), StdRng::seed_from_u64(3))
    }

    #[test]
    fn bars_ease_towards_targets() {
        let mut av = visualizer();
        // outside the retarget window targets stay put
        av.time = 0.1;
        let before = av.targets().to_vec();
        av.update(0.05);
        assert_eq!(av.targets(), &before[..]);
        for (h, t) in av.heights().iter().zip(&before) {
            assert!((h - t * 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn targets_stay_in_unit_range() {
        let mut av = visualizer();
        for _ in 0..300 {
            av.update(1.0 / 30.0);
            assert!(av.targets().iter().all(|t| (0.0..=1.0).contains(t)));
            assert!(av.heights().iter().all(|h| (0.0..=1.0).contains(h)));
        }
    }

    #[test]
    fn bars_grow_from_the_bottom() {
        let mut av = visualizer();
        for _ in 0..30 {
            av.update(1.0 / 30.0);
        }
        let mut fb = FrameBuffer::new(80, 20);
        av.render(&mut fb);
        assert!(fb.row_text(19).contains('█'));
        for x in 0..80 {
            let cell = fb.get(x, 19).unwrap();
            if cell.ch == '█' {
                assert_eq!(cell.style.fg, palette::GREEN);
            }
        }
    }
}
