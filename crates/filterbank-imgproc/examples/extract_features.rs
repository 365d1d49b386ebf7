use filterbank_image::{Image, ImageSize};
use filterbank_imgproc::batch::filter_response;
use filterbank_imgproc::error::FilterError;

fn main() -> Result<(), FilterError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // a small synthetic batch of gradient images
    let size = ImageSize {
        width: 64,
        height: 48,
    };
    let images = (0..4)
        .map(|i| {
            let data = (0..size.width * size.height * 3)
                .map(|j| ((i * 17 + j) % 256) as f32)
                .collect();
            Image::<f32, 3>::new(size, data)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let responses = filter_response(&images, 3, true)?;

    for (i, features) in responses.iter().enumerate() {
        log::info!(
            "image {}: {} pixels x {} features",
            i,
            features.rows(),
            features.cols()
        );
    }

    Ok(())
}
