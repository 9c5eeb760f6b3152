/// Build- and platform-dependent behavior switches.
///
/// Each flag guards exactly one branch of the window lifecycle. The defaults
/// come from [`Capabilities::for_build`]; embedders may override them through
/// [`Window::with_capabilities`](crate::Window::with_capabilities).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Capabilities {
    /// `WindowType::External` may be constructed.
    pub external_rendering: bool,

    /// Icon requests reach the surface. When unset they are accepted and ignored.
    pub window_icon: bool,

    /// Raise the surface to the foreground after each initialization.
    ///
    /// Set on Windows, where the log window can end up in front of the render
    /// window.
    pub raise_on_initialize: bool,
}

impl Capabilities {
    pub const fn for_build() -> Self {
        Self {
            external_rendering: cfg!(feature = "external-rendering"),
            window_icon: true,
            raise_on_initialize: cfg!(target_os = "windows"),
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::for_build()
    }
}
