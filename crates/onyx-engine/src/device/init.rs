/// Settings for adapter, device and surface creation.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Use an sRGB surface format if the adapter offers one.
    pub prefer_srgb: bool,
    /// FIFO (vsync) is the only mode every backend guarantees.
    pub present_mode: wgpu::PresentMode,
    /// Falls back to the surface's first mode when unsupported.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,
    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            // Solid fills need no optional features.
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}
