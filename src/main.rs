// Path viewer: a geodesic tetrahedron/cube travelling along a Chaikin-refined
// closed path. Geometry comes from the engine; this file owns the GPU side.

use std::sync::Arc;

use winit::{
    event::{Event as WinitEvent, WindowEvent, ElementState, KeyEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};
use glam::{Mat4, Vec3, Vec4};
use wgpu::util::DeviceExt;

use geodesic_path::engine::{
    camera::ViewCamera,
    config::ViewerConfig,
    debug_overlay::{DebugOverlay, HudStats},
    input::{Command, InputState},
    mesh::line_loop,
    GpuVertex, LineVertex, PathSampler, ShadingMode, ShapeState, Tessellator,
};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

// ============================================================================
// UNIFORM DATA
// ============================================================================

/// Mirrors `Uniforms` in shader.wgsl (288 bytes).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    model: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    light_position: [f32; 4],
    ambient_product: [f32; 4],
    diffuse_product: [f32; 4],
    specular_product: [f32; 4],
    color: [f32; 4],
    shininess: [f32; 4],
}

impl Uniforms {
    fn new(config: &ViewerConfig, model: Mat4, view: Mat4, projection: Mat4) -> Self {
        let light = &config.lighting;
        Self {
            model: model.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            light_position: light.light_position.to_array(),
            ambient_product: light.ambient_product().to_array(),
            diffuse_product: light.diffuse_product().to_array(),
            specular_product: light.specular_product().to_array(),
            color: config.line_color.to_array(),
            shininess: [light.shininess, 0.0, 0.0, 0.0],
        }
    }
}

// ============================================================================
// PIPELINES
// ============================================================================

/// The three programs for one culling mode.
struct Pipelines {
    gouraud: wgpu::RenderPipeline,
    phong: wgpu::RenderPipeline,
    line: wgpu::RenderPipeline,
}

impl Pipelines {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        format: wgpu::TextureFormat,
        cull: wgpu::Face,
    ) -> Self {
        let target = PipelineTarget { device, layout, shader, format };
        Self {
            gouraud: target.build(
                "Gouraud Pipeline", "vs_gouraud", "fs_gouraud", &[GpuVertex::desc()],
                wgpu::PrimitiveTopology::TriangleList, Some(cull), wgpu::CompareFunction::Less,
            ),
            phong: target.build(
                "Phong Pipeline", "vs_phong", "fs_phong", &[GpuVertex::desc()],
                wgpu::PrimitiveTopology::TriangleList, Some(cull), wgpu::CompareFunction::Less,
            ),
            // LessEqual so the overlay wins ties against the shaded surface
            line: target.build(
                "Line Pipeline", "vs_line", "fs_line", &[LineVertex::desc()],
                wgpu::PrimitiveTopology::LineList, None, wgpu::CompareFunction::LessEqual,
            ),
        }
    }
}

/// Everything the pipelines share: device, layout, shader module, colour format.
struct PipelineTarget<'a> {
    device: &'a wgpu::Device,
    layout: &'a wgpu::PipelineLayout,
    shader: &'a wgpu::ShaderModule,
    format: wgpu::TextureFormat,
}

impl PipelineTarget<'_> {
    #[allow(clippy::too_many_arguments)]
    fn build(
        &self,
        label: &str,
        vs: &str,
        fs: &str,
        buffers: &[wgpu::VertexBufferLayout],
        topology: wgpu::PrimitiveTopology,
        cull_mode: Option<wgpu::Face>,
        depth_compare: wgpu::CompareFunction,
    ) -> wgpu::RenderPipeline {
        self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(self.layout),
            vertex: wgpu::VertexState {
                module: self.shader,
                entry_point: Some(vs),
                buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: self.shader,
                entry_point: Some(fs),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }
}

fn create_depth_view(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width.max(1),
            height: config.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// A vertex buffer plus the number of vertices it holds.
struct VertexBuffer {
    buffer: wgpu::Buffer,
    count: u32,
}

impl VertexBuffer {
    fn new<T: bytemuck::Pod>(device: &wgpu::Device, label: &str, vertices: &[T]) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self { buffer, count: vertices.len() as u32 }
    }
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

struct State {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    depth_view: wgpu::TextureView,

    cull_back: Pipelines,
    cull_front: Pipelines,

    mesh_uniform_buffer: wgpu::Buffer,
    mesh_bind_group: wgpu::BindGroup,
    path_uniform_buffer: wgpu::Buffer,
    path_bind_group: wgpu::BindGroup,

    // GPU copies of the geometry, replaced after every rebuild
    flat_vertices: VertexBuffer,
    smooth_vertices: VertexBuffer,
    wire_vertices: VertexBuffer,
    path_vertices: VertexBuffer,

    // Geometry and modes
    viewer: ViewerConfig,
    tessellator: Tessellator,
    path: PathSampler,
    shapes: ShapeState,
    camera: ViewCamera,
    input: InputState,
    overlay: DebugOverlay,

    // Animation
    path_position: f32,
    animating: bool,
    spin_deg: f32,
    front_culling: bool,

    frame_time_avg_ms: f32,
    fps: u32,
}

impl State {
    async fn new(window: Arc<Window>, viewer: ViewerConfig) -> Self {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("no suitable GPU adapter");

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await
            .expect("failed to create device");

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("uniform_bind_group_layout"),
            });

        let make_uniforms = |label: &str| {
            let initial = Uniforms::new(&viewer, Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY);
            let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(&[initial]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                layout: &uniform_bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
                label: Some(label),
            });
            (buffer, bind_group)
        };
        let (mesh_uniform_buffer, mesh_bind_group) = make_uniforms("Mesh Uniforms");
        let (path_uniform_buffer, path_bind_group) = make_uniforms("Path Uniforms");

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Render Pipeline Layout"),
                bind_group_layouts: &[&uniform_bind_group_layout],
                push_constant_ranges: &[],
            });

        let cull_back = Pipelines::new(&device, &render_pipeline_layout, &shader, config.format, wgpu::Face::Back);
        let cull_front = Pipelines::new(&device, &render_pipeline_layout, &shader, config.format, wgpu::Face::Front);

        let tessellator = Tessellator::new(Default::default(), viewer.initial_mesh_level as i32);
        let mut path = PathSampler::default();
        path.set_subdivisions(viewer.initial_path_level as i32);

        let mesh = tessellator.mesh();
        let flat_vertices = VertexBuffer::new(&device, "Flat Vertices", &mesh.gpu_vertices(ShadingMode::Gouraud));
        let smooth_vertices = VertexBuffer::new(&device, "Smooth Vertices", &mesh.gpu_vertices(ShadingMode::Phong));
        let wire_vertices = VertexBuffer::new(&device, "Wireframe Vertices", &mesh.wireframe_lines());
        let path_vertices = VertexBuffer::new(&device, "Path Vertices", &line_loop(path.points()));

        let overlay = DebugOverlay::new(&window, &device, config.format);
        let camera = ViewCamera::new(&viewer);

        log::info!(
            "{} level {} ({} triangles), path level {} ({} points)",
            tessellator.shape().name(),
            tessellator.level(),
            tessellator.triangle_count(),
            path.level(),
            path.points().len()
        );

        Self {
            window,
            surface,
            device,
            queue,
            config,
            size,
            depth_view,
            cull_back,
            cull_front,
            mesh_uniform_buffer,
            mesh_bind_group,
            path_uniform_buffer,
            path_bind_group,
            flat_vertices,
            smooth_vertices,
            wire_vertices,
            path_vertices,
            viewer,
            tessellator,
            path,
            shapes: ShapeState::new(),
            camera,
            input: InputState::new(),
            overlay,
            path_position: 0.0,
            animating: true,
            spin_deg: 0.0,
            front_culling: false,
            frame_time_avg_ms: 0.0,
            fps: 0,
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, &self.config);
        }
    }

    fn upload_mesh(&mut self) {
        let mesh = self.tessellator.mesh();
        self.flat_vertices = VertexBuffer::new(&self.device, "Flat Vertices", &mesh.gpu_vertices(ShadingMode::Gouraud));
        self.smooth_vertices = VertexBuffer::new(&self.device, "Smooth Vertices", &mesh.gpu_vertices(ShadingMode::Phong));
        self.wire_vertices = VertexBuffer::new(&self.device, "Wireframe Vertices", &mesh.wireframe_lines());
    }

    fn upload_path(&mut self) {
        self.path_vertices = VertexBuffer::new(&self.device, "Path Vertices", &line_loop(self.path.points()));
    }

    fn apply(&mut self, cmd: Command) {
        let max_mesh = self.viewer.max_mesh_level;
        let max_path = self.viewer.max_path_level;
        match cmd {
            Command::MeshLevelUp | Command::MeshLevelDown => {
                let delta = if cmd == Command::MeshLevelUp { 1 } else { -1 };
                let level = ViewerConfig::step_level(self.tessellator.level(), delta, max_mesh);
                if level != self.tessellator.level() {
                    self.tessellator.set_subdivisions(level as i32);
                    self.upload_mesh();
                    log::info!("mesh level {} ({} triangles)", level, self.tessellator.triangle_count());
                }
            }
            Command::PathLevelUp | Command::PathLevelDown => {
                let delta = if cmd == Command::PathLevelUp { 1 } else { -1 };
                let level = ViewerConfig::step_level(self.path.level(), delta, max_path);
                if level != self.path.level() {
                    self.path.set_subdivisions(level as i32);
                    self.upload_path();
                    log::info!("path level {} ({} points)", level, self.path.points().len());
                }
            }
            Command::CycleWireframe => {
                self.shapes.cycle_wireframe();
                log::info!("mode {}", self.shapes.label());
            }
            Command::ToggleShading => {
                self.shapes.toggle_shading();
                log::info!("mode {}", self.shapes.label());
            }
            Command::SwitchShape => {
                let shape = self.shapes.toggle_shape();
                self.tessellator.set_shape(shape);
                self.upload_mesh();
                log::info!("shape {} ({} triangles)", shape.name(), self.tessellator.triangle_count());
            }
            Command::ToggleAnimation => self.animating = !self.animating,
            Command::FlipCulling => self.front_culling = !self.front_culling,
            Command::ToggleFollow => {
                self.camera.toggle_follow();
            }
            Command::ToggleOverlay => self.overlay.toggle(),
        }
    }

    fn update(&mut self) {
        for cmd in self.input.drain_commands() {
            self.apply(cmd);
        }

        if self.animating {
            self.path_position = (self.path_position + self.viewer.animation_step) % 1.0;
        }
        self.spin_deg = (self.spin_deg + self.viewer.spin_step_deg) % 360.0;
    }

    fn mesh_position(&self) -> Vec4 {
        self.path.point_at(self.path_position)
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Update uniforms BEFORE the render pass
        let aspect = self.size.width.max(1) as f32 / self.size.height.max(1) as f32;
        let target = self.mesh_position().truncate();
        let view_matrix = self.camera.view_matrix(target);
        let projection = self.camera.projection_matrix(aspect);

        let model = Mat4::from_translation(target)
            * Mat4::from_rotation_y(self.spin_deg.to_radians())
            * Mat4::from_scale(Vec3::splat(self.viewer.mesh_scale));
        let mesh_uniforms = Uniforms::new(&self.viewer, model, view_matrix, projection);
        let path_uniforms = Uniforms::new(&self.viewer, Mat4::IDENTITY, view_matrix, projection);
        self.queue.write_buffer(&self.mesh_uniform_buffer, 0, bytemuck::cast_slice(&[mesh_uniforms]));
        self.queue.write_buffer(&self.path_uniform_buffer, 0, bytemuck::cast_slice(&[path_uniforms]));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.viewer.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            let pipelines = if self.front_culling { &self.cull_front } else { &self.cull_back };

            // Path loop
            render_pass.set_pipeline(&pipelines.line);
            render_pass.set_bind_group(0, &self.path_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.path_vertices.buffer.slice(..));
            render_pass.draw(0..self.path_vertices.count, 0..1);

            render_pass.set_bind_group(0, &self.mesh_bind_group, &[]);

            if self.shapes.draws_shaded() {
                let (pipeline, vertices) = match self.shapes.shading {
                    ShadingMode::Gouraud => (&pipelines.gouraud, &self.flat_vertices),
                    ShadingMode::Phong => (&pipelines.phong, &self.smooth_vertices),
                };
                render_pass.set_pipeline(pipeline);
                render_pass.set_vertex_buffer(0, vertices.buffer.slice(..));
                render_pass.draw(0..vertices.count, 0..1);
            }

            if self.shapes.draws_wireframe() {
                render_pass.set_pipeline(&pipelines.line);
                render_pass.set_vertex_buffer(0, self.wire_vertices.buffer.slice(..));
                render_pass.draw(0..self.wire_vertices.count, 0..1);
            }
        }

        let stats = self.overlay.visible.then(|| HudStats {
            fps: self.fps,
            frame_time_avg_ms: self.frame_time_avg_ms,
            resolution: (self.size.width, self.size.height),
            mode_label: self.shapes.label(),
            shape_name: self.tessellator.shape().name(),
            mesh_level: self.tessellator.level(),
            triangle_count: self.tessellator.triangle_count(),
            path_level: self.path.level(),
            path_points: self.path.points().len(),
            path_position: self.path_position,
            animating: self.animating,
            follow_camera: self.camera.follow,
            cull_front: self.front_culling,
        });

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: self.window.scale_factor() as f32,
        };
        self.overlay.render(
            &self.device,
            &self.queue,
            &mut encoder,
            &self.window,
            &view,
            &screen_descriptor,
            stats.as_ref(),
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

// ============================================================================
// MAIN
// ============================================================================

fn main() {
    env_logger::init();

    let event_loop = EventLoop::new().expect("failed to create event loop");

    let window_attributes = Window::default_attributes()
        .with_title("Geodesic Path Viewer")
        .with_inner_size(winit::dpi::LogicalSize::new(800, 800));

    let window = Arc::new(
        event_loop
            .create_window(window_attributes)
            .expect("failed to create window"),
    );

    let mut state = pollster::block_on(State::new(window.clone(), ViewerConfig::default()));
    let mut frame_count = 0;
    let mut last_fps_update = std::time::Instant::now();

    let result = event_loop.run(move |event, control_flow| {
        match event {
            WinitEvent::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => {
                let _ = state.overlay.handle_window_event(&window, event);
                state.input.process_event(event);

                match event {
                    WindowEvent::CloseRequested
                    | WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                state: ElementState::Pressed,
                                physical_key: PhysicalKey::Code(KeyCode::Escape),
                                ..
                            },
                        ..
                    } => control_flow.exit(),
                    WindowEvent::Resized(physical_size) => {
                        state.resize(*physical_size);
                    }
                    WindowEvent::RedrawRequested => {
                        state.update();
                        match state.render() {
                            Ok(_) => {}
                            Err(wgpu::SurfaceError::Lost) => state.resize(state.size),
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                log::error!("surface out of memory, exiting");
                                control_flow.exit();
                            }
                            Err(e) => log::warn!("{:?}", e),
                        }

                        frame_count += 1;
                        let now = std::time::Instant::now();
                        let elapsed = (now - last_fps_update).as_secs_f32();
                        if elapsed >= 1.0 {
                            state.fps = frame_count;
                            state.frame_time_avg_ms = elapsed * 1000.0 / frame_count as f32;
                            log::debug!(
                                "FPS: {} | Triangles: {} | Path points: {}",
                                frame_count,
                                state.tessellator.triangle_count(),
                                state.path.points().len()
                            );
                            frame_count = 0;
                            last_fps_update = now;
                        }
                    }
                    _ => {}
                }
            }
            WinitEvent::AboutToWait => {
                window.request_redraw();
            }
            _ => {}
        }
    });

    if let Err(e) = result {
        log::error!("event loop terminated: {e}");
    }
}
