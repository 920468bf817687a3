//! Console session state

use crate::backend::Backend;
use crate::ConsoleError;
use inference_engine::{
    PredictionRequest, PredictionResult, SensorWindow, NUM_SENSORS, WINDOW_LEN,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Highest engine identifier the console accepts
pub const MAX_ENGINE_ID: u32 = 999;

/// One interactive session: the engine under inspection and its current window
pub struct Session {
    engine_id: u32,
    window: Option<SensorWindow>,
    rng: StdRng,
}

impl Session {
    /// Session with an OS-seeded generator
    pub fn new(engine_id: u32) -> Result<Self, ConsoleError> {
        Self::with_rng(engine_id, StdRng::from_os_rng())
    }

    /// Session whose generated windows are reproducible
    pub fn seeded(engine_id: u32, seed: u64) -> Result<Self, ConsoleError> {
        Self::with_rng(engine_id, StdRng::seed_from_u64(seed))
    }

    fn with_rng(engine_id: u32, rng: StdRng) -> Result<Self, ConsoleError> {
        let mut session = Self {
            engine_id: 1,
            window: None,
            rng,
        };
        session.set_engine_id(u64::from(engine_id))?;
        Ok(session)
    }

    /// Current engine identifier
    pub fn engine_id(&self) -> u32 {
        self.engine_id
    }

    /// Select the engine, within `1..=MAX_ENGINE_ID`
    pub fn set_engine_id(&mut self, value: u64) -> Result<(), ConsoleError> {
        match u32::try_from(value) {
            Ok(id) if (1..=MAX_ENGINE_ID).contains(&id) => {
                self.engine_id = id;
                Ok(())
            }
            _ => Err(ConsoleError::InvalidEngineId {
                value,
                max: MAX_ENGINE_ID,
            }),
        }
    }

    /// Current window, if one was generated
    pub fn window(&self) -> Option<&SensorWindow> {
        self.window.as_ref()
    }

    /// Fill the buffer with uniform random readings in `[0, 1)`
    pub fn generate_sample(&mut self) -> Result<&SensorWindow, ConsoleError> {
        let values: Vec<f32> = (0..WINDOW_LEN * NUM_SENSORS)
            .map(|_| self.rng.random::<f32>())
            .collect();
        let window = SensorWindow::from_flat(values)?;
        debug!("Generated sample window for engine {}", self.engine_id);
        Ok(&*self.window.insert(window))
    }

    /// Submit the buffered window through `backend`
    pub async fn request_prediction(&self, backend: &Backend) -> Result<PredictionResult, ConsoleError> {
        let window = self.window.as_ref().ok_or(ConsoleError::NoData)?;
        let request = PredictionRequest::new(self.engine_id, window);
        backend.predict(&request).await
    }
}
