//! Background model loading

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use arsync_renderer::{AssetError, ModelAsset, load_gltf};

/// Model loading failure.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("Model loader stopped before delivering a result")]
    Interrupted,
}

type LoadResult = Result<ModelAsset, LoadError>;

/// Loads the model off the event loop and hands it over exactly once.
pub struct ModelLoader {
    receiver: Option<Receiver<LoadResult>>,
}

impl ModelLoader {
    /// Start loading a glTF file on a worker thread.
    pub fn spawn(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let (sender, receiver) = mpsc::channel();

        tracing::info!("Loading model {:?}", path);
        thread::Builder::new()
            .name("model-loader".to_string())
            .spawn(move || {
                let result = load_gltf(&path).map_err(LoadError::from);
                // The receiver is gone if the session ended first
                let _ = sender.send(result);
            })?;

        Ok(Self {
            receiver: Some(receiver),
        })
    }

    /// A loader whose model is already available.
    pub fn ready(asset: ModelAsset) -> Self {
        let (sender, receiver) = mpsc::channel();
        let _ = sender.send(Ok(asset));
        Self {
            receiver: Some(receiver),
        }
    }

    /// Whether a result has yet to be handed out.
    pub fn is_pending(&self) -> bool {
        self.receiver.is_some()
    }

    /// Take the result if loading has finished.
    pub fn poll(&mut self) -> Option<LoadResult> {
        let receiver = self.receiver.as_ref()?;
        let result = match receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(LoadError::Interrupted),
        };
        self.receiver = None;
        Some(result)
    }

    /// Block until loading has finished.
    pub fn wait(&mut self) -> Option<LoadResult> {
        let receiver = self.receiver.take()?;
        Some(receiver.recv().unwrap_or(Err(LoadError::Interrupted)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reports_error_once() {
        let mut loader = ModelLoader::spawn("no/such/model.glb").unwrap();
        assert!(loader.is_pending());

        let result = loader.wait().unwrap();
        assert!(matches!(result, Err(LoadError::Asset(AssetError::Load(_)))));
        assert!(!loader.is_pending());
        assert!(loader.poll().is_none());
        assert!(loader.wait().is_none());
    }
}
