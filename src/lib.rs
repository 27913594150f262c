use std::iter;
use std::sync::Arc;

use anyhow::Context;
use log::{error, info, warn};
use wgpu::util::DeviceExt;
use winit::{
	dpi::PhysicalSize,
	event::*,
	event_loop::EventLoop,
	keyboard::{Key, NamedKey},
	window::{Window, WindowBuilder},
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod config;
pub mod escape_time;
pub mod iterations;
pub mod palette;
pub mod precision;
mod texture;
pub mod timing;
pub mod view;

use config::{WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};
use palette::Palette;
use texture::PaletteTexture;
use timing::FrameTimer;
use view::ViewState;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
	position: [f32; 2],
	tex_coords: [f32; 2],
}

impl Vertex {
	const ATTRIBS: [wgpu::VertexAttribute; 2] =
		wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

	fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
		use std::mem;

		wgpu::VertexBufferLayout {
			array_stride: mem::size_of::<Self>() as wgpu::BufferAddress,
			step_mode: wgpu::VertexStepMode::Vertex,
			attributes: &Self::ATTRIBS,
		}
	}
}

// full-screen quad, texture v grows upwards so +imaginary is at the top
const VERTICES: &[Vertex] = &[
	Vertex {
		position: [1.0, 1.0],
		tex_coords: [1.0, 1.0],
	}, // top right
	Vertex {
		position: [1.0, -1.0],
		tex_coords: [1.0, 0.0],
	}, // bottom right
	Vertex {
		position: [-1.0, -1.0],
		tex_coords: [0.0, 0.0],
	}, // bottom left
	Vertex {
		position: [-1.0, 1.0],
		tex_coords: [0.0, 1.0],
	}, // top left
];

const INDICES: &[u16] = &[0, 1, 3, 1, 2, 3];

struct State {
	surface: wgpu::Surface<'static>,
	device: wgpu::Device,
	queue: wgpu::Queue,
	config: wgpu::SurfaceConfiguration,
	size: PhysicalSize<u32>,
	render_pipeline: wgpu::RenderPipeline,
	vertex_buffer: wgpu::Buffer,
	index_buffer: wgpu::Buffer,
	num_indices: u32,
	view: ViewState,
	view_uniform_buffer: wgpu::Buffer,
	view_uniform_bind_group: wgpu::BindGroup,
	palette_bind_group: wgpu::BindGroup,
	frame_timer: FrameTimer,
	window: Arc<Window>,
}

impl State {
	async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
		let size = window.inner_size();

		let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
			backends: wgpu::Backends::all(),
			..Default::default()
		});

		let surface = instance
			.create_surface(window.clone())
			.context("failed to create a surface for the window")?;

		let adapter = instance
			.request_adapter(&wgpu::RequestAdapterOptions {
				power_preference: wgpu::PowerPreference::default(),
				compatible_surface: Some(&surface),
				force_fallback_adapter: false,
			})
			.await
			.context("no GPU adapter compatible with the window surface")?;
		let adapter_info = adapter.get_info();
		info!("Using adapter {} ({:?})", adapter_info.name, adapter_info.backend);

		let (device, queue) = adapter
			.request_device(
				&wgpu::DeviceDescriptor {
					label: None,
					required_features: wgpu::Features::empty(),
					// WebGL doesn't support all of wgpu's features, so if
					// we're building for the web we'll have to disable some.
					required_limits: if cfg!(target_arch = "wasm32") {
						wgpu::Limits::downlevel_webgl2_defaults()
					} else {
						wgpu::Limits::default()
					},
					memory_hints: Default::default(),
				},
				None, // Trace path
			)
			.await
			.context("failed to request a GPU device")?;

		let surface_caps = surface.get_capabilities(&adapter);
		// The palette holds plain RGB values, an Srgb surface would
		// re-encode them and wash the gradient out.
		let surface_format = surface_caps
			.formats
			.iter()
			.copied()
			.find(|f| !f.is_srgb())
			.or_else(|| surface_caps.formats.first().copied())
			.context("surface reports no supported texture formats")?;
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

		let view = ViewState::default();
		let view_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
			label: Some("view_uniform_buffer"),
			contents: bytemuck::cast_slice(&[view.uniform()]),
			usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
		});
		let view_uniform_bind_group_layout =
			device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
				label: Some("view_uniform_bind_group_layout"),
				entries: &[wgpu::BindGroupLayoutEntry {
					binding: 0,
					visibility: wgpu::ShaderStages::FRAGMENT,
					ty: wgpu::BindingType::Buffer {
						ty: wgpu::BufferBindingType::Uniform,
						has_dynamic_offset: false,
						min_binding_size: None,
					},
					count: None,
				}],
			});
		let view_uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
			label: Some("view_uniform_bind_group"),
			layout: &view_uniform_bind_group_layout,
			entries: &[wgpu::BindGroupEntry {
				binding: 0,
				resource: view_uniform_buffer.as_entire_binding(),
			}],
		});

		let palette_texture = PaletteTexture::from_palette(&device, &queue, &Palette::gradient());
		let palette_bind_group_layout = PaletteTexture::bind_group_layout(&device);
		let palette_bind_group = palette_texture.bind_group(&device, &palette_bind_group_layout);

		let shader = device.create_shader_module(wgpu::include_wgsl!("shader.wgsl"));

		let render_pipeline_layout =
			device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
				label: Some("Render Pipeline Layout"),
				bind_group_layouts: &[&view_uniform_bind_group_layout, &palette_bind_group_layout],
				push_constant_ranges: &[],
			});

		let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
			label: Some("Render Pipeline"),
			layout: Some(&render_pipeline_layout),
			vertex: wgpu::VertexState {
				module: &shader,
				entry_point: Some("vs_main"),
				compilation_options: Default::default(),
				buffers: &[Vertex::desc()],
			},
			fragment: Some(wgpu::FragmentState {
				module: &shader,
				entry_point: Some("fs_main"),
				compilation_options: Default::default(),
				targets: &[Some(wgpu::ColorTargetState {
					format: config.format,
					blend: Some(wgpu::BlendState::REPLACE),
					write_mask: wgpu::ColorWrites::ALL,
				})],
			}),
			primitive: wgpu::PrimitiveState {
				topology: wgpu::PrimitiveTopology::TriangleList,
				strip_index_format: None,
				front_face: wgpu::FrontFace::Ccw,
				cull_mode: None,
				polygon_mode: wgpu::PolygonMode::Fill,
				unclipped_depth: false,
				conservative: false,
			},
			depth_stencil: None,
			multisample: wgpu::MultisampleState {
				count: 1,
				mask: !0,
				alpha_to_coverage_enabled: false,
			},
			multiview: None,
			cache: None,
		});

		let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
			label: Some("Vertex Buffer"),
			contents: bytemuck::cast_slice(VERTICES),
			usage: wgpu::BufferUsages::VERTEX,
		});
		let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
			label: Some("Index Buffer"),
			contents: bytemuck::cast_slice(INDICES),
			usage: wgpu::BufferUsages::INDEX,
		});
		let num_indices = INDICES.len() as u32;

		Ok(Self {
			surface,
			device,
			queue,
			config,
			size,
			render_pipeline,
			vertex_buffer,
			index_buffer,
			num_indices,
			view,
			view_uniform_buffer,
			view_uniform_bind_group,
			palette_bind_group,
			frame_timer: FrameTimer::new(),
			window,
		})
	}

	pub fn window(&self) -> &Window {
		&self.window
	}

	pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
		if new_size.width > 0 && new_size.height > 0 {
			self.size = new_size;
			self.config.width = new_size.width;
			self.config.height = new_size.height;
			self.surface.configure(&self.device, &self.config);
		}
	}

	fn input(&mut self, event: &WindowEvent) -> bool {
		match event {
			WindowEvent::KeyboardInput {
				event:
					KeyEvent {
						state: ElementState::Pressed,
						logical_key: Key::Character(key),
						..
					},
				..
			} => {
				let frame_time = self.frame_timer.lap();
				if self.view.handle_key(key.as_str()) {
					self.window.request_redraw();
				}
				info!(
					"Frame time: {} ms, scale: {:e}, iterations: {}",
					frame_time.as_millis(),
					self.view.scale(),
					self.view.max_iterations()
				);
				true
			}
			_ => false,
		}
	}

	fn update(&mut self) {
		self.queue.write_buffer(
			&self.view_uniform_buffer,
			0,
			bytemuck::cast_slice(&[self.view.uniform()]),
		);
	}

	fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
		let output = self.surface.get_current_texture()?;
		let view = output
			.texture
			.create_view(&wgpu::TextureViewDescriptor::default());

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
						load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
						store: wgpu::StoreOp::Store,
					},
				})],
				depth_stencil_attachment: None,
				timestamp_writes: None,
				occlusion_query_set: None,
			});

			render_pass.set_pipeline(&self.render_pipeline);
			render_pass.set_bind_group(0, &self.view_uniform_bind_group, &[]);
			render_pass.set_bind_group(1, &self.palette_bind_group, &[]);
			render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
			render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
			render_pass.draw_indexed(0..self.num_indices, 0, 0..1);
		}

		self.queue.submit(iter::once(encoder.finish()));
		output.present();

		Ok(())
	}
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn start() {
	if let Err(err) = run().await {
		error!("{err:#}");
	}
}

pub async fn run() -> anyhow::Result<()> {
	cfg_if::cfg_if! {
		if #[cfg(target_arch = "wasm32")] {
			std::panic::set_hook(Box::new(console_error_panic_hook::hook));
			console_log::init_with_level(log::Level::Info).context("couldn't initialize logger")?;
		} else {
			env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
		}
	}

	let event_loop = EventLoop::new().map_err(|err| anyhow::anyhow!("failed to create event loop: {err}"))?;
	let window = WindowBuilder::new()
		.with_title(WINDOW_TITLE)
		.with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
		.with_resizable(false)
		.build(&event_loop)
		.map_err(|err| anyhow::anyhow!("failed to create window: {err}"))?;
	let window = Arc::new(window);

	#[cfg(target_arch = "wasm32")]
	{
		use winit::platform::web::WindowExtWebSys;
		web_sys::window()
			.and_then(|win| win.document())
			.and_then(|doc| {
				let dst = doc.get_element_by_id("mandelbrot-canvas")?;
				let canvas = web_sys::Element::from(window.canvas()?);
				dst.append_child(&canvas).ok()?;
				Some(())
			})
			.context("couldn't append canvas to document body")?;
	}

	let mut state = State::new(window).await?;
	info!("Keys: e/q zoom in/out, w/a/s/d pan, Escape quits");

	event_loop
		.run(move |event, elwt| match event {
			Event::WindowEvent {
				ref event,
				window_id,
			} if window_id == state.window().id() => {
				if !state.input(event) {
					match event {
						WindowEvent::CloseRequested
						| WindowEvent::KeyboardInput {
							event:
								KeyEvent {
									state: ElementState::Pressed,
									logical_key: Key::Named(NamedKey::Escape),
									..
								},
							..
						} => elwt.exit(),
						WindowEvent::Resized(physical_size) => {
							state.resize(*physical_size);
						}
						WindowEvent::RedrawRequested => {
							state.update();
							match state.render() {
								Ok(_) => {}
								// Reconfigure the surface if it's lost or outdated
								Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
									state.resize(state.size)
								}
								// The system is out of memory, we should probably quit
								Err(wgpu::SurfaceError::OutOfMemory) => {
									error!("Surface out of memory");
									elwt.exit();
								}
								// We're ignoring timeouts
								Err(wgpu::SurfaceError::Timeout) => warn!("Surface timeout"),
								Err(err) => warn!("Surface error: {err}"),
							}
						}
						_ => {}
					}
				}
			}
			Event::AboutToWait => {
				// RedrawRequested will only trigger once, unless we manually
				// request it.
				state.window().request_redraw();
			}
			_ => {}
		})
		.map_err(|err| anyhow::anyhow!("event loop failed: {err}"))
}
