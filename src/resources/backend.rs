//! Rendering backend and detail panel collaborators.
//!
//! The engine never draws. It creates one backend element per gallery item
//! and afterwards only pushes changed screen-space values through
//! [`RenderBackend`]. The project detail panel is driven through
//! [`DetailPanel`].
//!
//! Both are stored as non-send resources so that backends holding
//! thread-bound handles (DOM nodes, GL contexts) can be plugged in:
//!
//! ```ignore
//! world.insert_non_send_resource(RenderBackendRes(Box::new(LogBackend::default())));
//! world.insert_non_send_resource(DetailPanelRes(Box::new(LogBackend::default())));
//! ```

use log::{info, trace};

/// Opaque identifier of a backend element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BackendHandle(pub u32);

/// Sink for visual updates of gallery items.
pub trait RenderBackend {
    /// Create an element showing the image at `source`.
    fn create_entity(&mut self, source: &str) -> BackendHandle;
    /// Move the element's pivot to screen coordinates `(x, y)`.
    fn set_position(&mut self, handle: BackendHandle, x: f32, y: f32);
    /// Set the element's uniform on-screen scale.
    fn set_scale(&mut self, handle: BackendHandle, scale: f32);
    fn set_opacity(&mut self, handle: BackendHandle, opacity: f32);
    fn set_z_index(&mut self, handle: BackendHandle, z: i32);
}

/// Project description panel shown next to a focused group.
pub trait DetailPanel {
    /// Show the panel filtered to `tag`.
    fn show_panel(&mut self, tag: &str);
    fn hide_panel(&mut self);
}

/// Non-send resource wrapping the active [`RenderBackend`].
pub struct RenderBackendRes(pub Box<dyn RenderBackend>);

/// Non-send resource wrapping the active [`DetailPanel`].
pub struct DetailPanelRes(pub Box<dyn DetailPanel>);

/// Backend that only logs. Used by the headless binary.
#[derive(Debug, Default)]
pub struct LogBackend {
    next_handle: u32,
}

impl RenderBackend for LogBackend {
    fn create_entity(&mut self, source: &str) -> BackendHandle {
        let handle = BackendHandle(self.next_handle);
        self.next_handle += 1;
        info!("create {:?} from {}", handle, source);
        handle
    }

    fn set_position(&mut self, handle: BackendHandle, x: f32, y: f32) {
        trace!("{:?} position ({:.1}, {:.1})", handle, x, y);
    }

    fn set_scale(&mut self, handle: BackendHandle, scale: f32) {
        trace!("{:?} scale {:.3}", handle, scale);
    }

    fn set_opacity(&mut self, handle: BackendHandle, opacity: f32) {
        trace!("{:?} opacity {:.2}", handle, opacity);
    }

    fn set_z_index(&mut self, handle: BackendHandle, z: i32) {
        trace!("{:?} z-index {}", handle, z);
    }
}

impl DetailPanel for LogBackend {
    fn show_panel(&mut self, tag: &str) {
        info!("panel: showing project '{}'", tag);
    }

    fn hide_panel(&mut self) {
        info!("panel: hidden");
    }
}
