fn main() -> anyhow::Result<()> {
	pollster::block_on(mandelbrot_gpu::run())
}
