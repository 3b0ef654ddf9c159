//! GUI event classification and dispatch.
//!
//! Events arrive from the GUI layer already classified into a closed set of
//! tags. Dispatch mutates slot state directly and hands everything that
//! needs a window, dialog, or process back to the caller as a [`Reaction`].

use std::path::PathBuf;

use log::warn;

use crate::scene::SceneBackend;
use crate::slots::SlotManager;

/// The four menu commands exposed by the GUI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    AddMesh,
    CloseLast,
    CloseAll,
    Exit,
}

/// Tags for file-selection dialogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogId {
    AddMesh,
}

/// UI events the dispatcher understands. Anything else the GUI layer sees
/// is dropped before it gets here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    MenuItem(MenuCommand),
    FileSelected { dialog: DialogId, path: PathBuf },
}

/// Work the GUI layer must perform in response to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// Open a modal file-selection dialog with the given tag.
    OpenMeshDialog(DialogId),
    /// Show a modal error message.
    ShowError { title: String, message: String },
    /// Request application shutdown.
    Shutdown,
}

/// Route one event to the slot manager or back to the GUI layer.
///
/// A close on an empty slot set is reported on the console and otherwise
/// ignored; a failed mesh load produces a modal error carrying the
/// attempted path. Successful loads are silent.
pub fn dispatch(
    event: UiEvent,
    slots: &mut SlotManager,
    scene: &mut dyn SceneBackend,
) -> Option<Reaction> {
    match event {
        UiEvent::MenuItem(MenuCommand::AddMesh) => {
            Some(Reaction::OpenMeshDialog(DialogId::AddMesh))
        }
        UiEvent::MenuItem(MenuCommand::CloseLast) => {
            if let Err(err) = slots.close_last(scene) {
                warn!("{err}");
            }
            None
        }
        UiEvent::MenuItem(MenuCommand::CloseAll) => {
            slots.close_all(scene);
            None
        }
        UiEvent::MenuItem(MenuCommand::Exit) => Some(Reaction::Shutdown),
        UiEvent::FileSelected {
            dialog: DialogId::AddMesh,
            path,
        } => match slots.add_mesh(scene, &path) {
            Ok(_) => None,
            Err(err) => Some(Reaction::ShowError {
                title: "Loading Mesh Error".to_string(),
                message: format!("{err}, when loading {}", path.display()),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{cells, GridSpec};
    use crate::scene::HeadlessScene;

    fn setup() -> (HeadlessScene, SlotManager) {
        let mut scene = HeadlessScene::new();
        let cells = cells(1280, 720, GridSpec::new(2, 2), 100.0);
        let slots = SlotManager::new(&mut scene, &cells, 100.0, 3.2);
        (scene, slots)
    }

    #[test]
    fn test_add_mesh_opens_dialog() {
        let (mut scene, mut slots) = setup();
        let reaction = dispatch(
            UiEvent::MenuItem(MenuCommand::AddMesh),
            &mut slots,
            &mut scene,
        );
        assert_eq!(reaction, Some(Reaction::OpenMeshDialog(DialogId::AddMesh)));
    }

    #[test]
    fn test_exit_requests_shutdown() {
        let (mut scene, mut slots) = setup();
        let reaction = dispatch(UiEvent::MenuItem(MenuCommand::Exit), &mut slots, &mut scene);
        assert_eq!(reaction, Some(Reaction::Shutdown));
    }

    #[test]
    fn test_file_selected_loads_silently() {
        let (mut scene, mut slots) = setup();
        let reaction = dispatch(
            UiEvent::FileSelected {
                dialog: DialogId::AddMesh,
                path: "a.obj".into(),
            },
            &mut slots,
            &mut scene,
        );
        assert_eq!(reaction, None);
        assert_eq!(slots.occupied_count(), 1);
    }

    #[test]
    fn test_failed_load_surfaces_modal_error() {
        let (mut scene, mut slots) = setup();
        scene.fail_loads = Some("unsupported mesh format".into());

        let reaction = dispatch(
            UiEvent::FileSelected {
                dialog: DialogId::AddMesh,
                path: "broken.xyz".into(),
            },
            &mut slots,
            &mut scene,
        );
        match reaction {
            Some(Reaction::ShowError { message, .. }) => {
                assert!(message.contains("broken.xyz"));
                assert!(message.contains("unsupported mesh format"));
            }
            other => panic!("expected ShowError, got {other:?}"),
        }
    }

    #[test]
    fn test_close_last_on_empty_is_quiet() {
        let (mut scene, mut slots) = setup();
        let reaction = dispatch(
            UiEvent::MenuItem(MenuCommand::CloseLast),
            &mut slots,
            &mut scene,
        );
        assert_eq!(reaction, None);
    }

    #[test]
    fn test_close_all_via_dispatch() {
        let (mut scene, mut slots) = setup();
        for name in ["a.obj", "b.obj"] {
            dispatch(
                UiEvent::FileSelected {
                    dialog: DialogId::AddMesh,
                    path: name.into(),
                },
                &mut slots,
                &mut scene,
            );
        }
        dispatch(
            UiEvent::MenuItem(MenuCommand::CloseAll),
            &mut slots,
            &mut scene,
        );
        assert!(slots.is_empty());
    }
}
