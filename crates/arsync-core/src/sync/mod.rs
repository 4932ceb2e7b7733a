//! Synchronization state machine
//!
//! Translates provider events into scene effects. [`handle`] is pure: it
//! never touches a renderer, so the mapping can be checked by feeding
//! events and inspecting the returned effects.

mod state;

pub use state::*;

use crate::event::TrackingEvent;

/// Compute the next state and the effects for one input.
pub fn handle(state: &SyncState, input: &SyncInput) -> (SyncState, Vec<Effect>) {
    let mut next = state.clone();
    let mut effects = Vec::new();

    match input {
        SyncInput::Started => {
            if state.phase == Phase::Idle {
                next.phase = Phase::TrackingAbsent;
            }
        }
        SyncInput::ModelLoaded => {
            if state.model == ModelStatus::Loading && state.detected_target().is_some() {
                effects.push(Effect::AttachModel);
            }
            next.model = ModelStatus::Ready;
        }
        SyncInput::Tracking(_) if !state.is_tracking() => {
            tracing::warn!("Ignoring {:?} before tracking started", input);
        }
        SyncInput::Tracking(event) => match event {
            TrackingEvent::Detected(id) => {
                if state.detected_target().is_none() {
                    if state.model == ModelStatus::Ready {
                        effects.push(Effect::AttachModel);
                    }
                    effects.push(Effect::BindCameraFeed);
                }
                next.phase = Phase::TrackingPresent(id.clone());
            }
            TrackingEvent::Lost(id) => match state.detected_target() {
                Some(current) if current == id => {
                    if state.model == ModelStatus::Ready {
                        effects.push(Effect::DetachModel);
                    }
                    effects.push(Effect::ClearBackground);
                    next.phase = Phase::TrackingAbsent;
                }
                Some(current) => {
                    tracing::warn!("Lost {} while tracking {}, ignoring", id, current);
                }
                None => {}
            },
            TrackingEvent::Pose(pose) => effects.push(Effect::SetCameraPose(*pose)),
            TrackingEvent::Resize => effects.push(Effect::RefreshProjection),
            TrackingEvent::Frame => effects.push(Effect::Draw),
        },
    }

    (next, effects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Pose, TargetId};

    fn run(state: SyncState, inputs: &[SyncInput]) -> (SyncState, Vec<Effect>) {
        inputs.iter().fold((state, Vec::new()), |(state, mut all), input| {
            let (next, effects) = handle(&state, input);
            all.extend(effects);
            (next, all)
        })
    }

    fn tracking_ready() -> SyncState {
        run(SyncState::new(), &[SyncInput::Started, SyncInput::ModelLoaded]).0
    }

    fn detected(id: &str) -> SyncInput {
        TrackingEvent::Detected(TargetId::new(id)).into()
    }

    fn lost(id: &str) -> SyncInput {
        TrackingEvent::Lost(TargetId::new(id)).into()
    }

    #[test]
    fn test_events_ignored_before_start() {
        let (state, effects) = run(
            SyncState::new(),
            &[detected("frame"), TrackingEvent::Frame.into()],
        );
        assert_eq!(state.phase, Phase::Idle);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_detected_then_lost_restores_state() {
        let before = tracking_ready();
        let (after_detect, effects) = handle(&before, &detected("frame"));
        assert_eq!(effects, vec![Effect::AttachModel, Effect::BindCameraFeed]);
        assert!(after_detect.model_visible());

        let (after_lost, effects) = handle(&after_detect, &lost("frame"));
        assert_eq!(effects, vec![Effect::DetachModel, Effect::ClearBackground]);
        assert_eq!(after_lost, before);
    }

    #[test]
    fn test_lost_for_other_target_is_ignored() {
        let (state, _) = handle(&tracking_ready(), &detected("a"));
        let (next, effects) = handle(&state, &lost("b"));
        assert!(effects.is_empty());
        assert_eq!(next, state);
    }

    #[test]
    fn test_lost_without_detection_is_noop() {
        let state = tracking_ready();
        let (next, effects) = handle(&state, &lost("a"));
        assert!(effects.is_empty());
        assert_eq!(next, state);
    }

    #[test]
    fn test_second_detection_switches_target_without_effects() {
        let (state, _) = handle(&tracking_ready(), &detected("a"));
        let (next, effects) = handle(&state, &detected("b"));
        assert!(effects.is_empty());
        assert_eq!(next.detected_target(), Some(&TargetId::new("b")));

        // Only the new target can hide the model again
        let (_, effects) = handle(&next, &lost("a"));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_detection_before_model_loaded_is_buffered() {
        let started = run(SyncState::new(), &[SyncInput::Started]).0;
        let (state, effects) = handle(&started, &detected("frame"));
        assert_eq!(effects, vec![Effect::BindCameraFeed]);
        assert!(!state.model_visible());

        let (state, effects) = handle(&state, &SyncInput::ModelLoaded);
        assert_eq!(effects, vec![Effect::AttachModel]);
        assert!(state.model_visible());
    }

    #[test]
    fn test_lost_before_model_loaded_never_attaches() {
        let (state, effects) = run(
            SyncState::new(),
            &[
                SyncInput::Started,
                detected("frame"),
                lost("frame"),
                SyncInput::ModelLoaded,
            ],
        );
        assert_eq!(effects, vec![Effect::BindCameraFeed, Effect::ClearBackground]);
        assert_eq!(state.phase, Phase::TrackingAbsent);
        assert_eq!(state.model, ModelStatus::Ready);
    }

    #[test]
    fn test_pose_passes_matrix_through() {
        let pose = Pose::from_array(std::array::from_fn(|i| i as f32));
        let (_, effects) = handle(&tracking_ready(), &TrackingEvent::Pose(pose).into());
        assert_eq!(effects, vec![Effect::SetCameraPose(pose)]);
    }

    #[test]
    fn test_every_frame_draws() {
        let mut inputs: Vec<SyncInput> = Vec::new();
        for i in 0..10 {
            inputs.push(TrackingEvent::Frame.into());
            if i % 3 == 0 {
                inputs.push(detected("frame"));
                inputs.push(TrackingEvent::Pose(Pose::IDENTITY).into());
            }
            if i % 4 == 0 {
                inputs.push(lost("frame"));
                inputs.push(TrackingEvent::Resize.into());
            }
        }

        let (_, effects) = run(tracking_ready(), &inputs);
        let draws = effects.iter().filter(|e| **e == Effect::Draw).count();
        assert_eq!(draws, 10);
    }

    #[test]
    fn test_started_twice_keeps_phase() {
        let (state, _) = handle(&tracking_ready(), &detected("frame"));
        let (next, effects) = handle(&state, &SyncInput::Started);
        assert!(effects.is_empty());
        assert_eq!(next, state);
    }
}
