//! Human-readable progress output.

use prodshot_core::pipeline::Event;
use prodshot_core::select::ScoreSource;

pub fn print_event(event: &Event) {
    println!("{}", render(event));
}

/// One line (or block) of text per event.
pub fn render(event: &Event) -> String {
    match event {
        Event::ProductName(name) if name.is_empty() => "Product name: (none found in URL)".into(),
        Event::ProductName(name) => format!("Product name: {name}"),
        Event::FetchingPage(url) => format!("\nGetting image from {url}"),
        Event::FetchFailed(err) => format!("An error occurred: {err}"),
        Event::ImageFound { url, score, source } => {
            let by = match source {
                ScoreSource::Alt => "alt text",
                ScoreSource::Src => "file name",
            };
            format!("Image found: {url} (match {score:.2} by {by})")
        }
        Event::NoMatch => "No good matching image found".into(),
        Event::Saved(path) => format!("Image saved as {}", path.display()),
        Event::SaveFailed(err) => format!("Failed to save image: {err}"),
        Event::RequestingPrompt => {
            "\nSending product name to Gemini to generate an image prompt...".into()
        }
        Event::PromptReady(prompt) => format!("\nObtained image prompt:\n{prompt}"),
        Event::PromptFailed(err) => format!("An error occurred with the Gemini API: {err}"),
        Event::GeneratingImage => "\nSending prompt to Stability AI's ultra model".into(),
        Event::Generated(path) => format!("\nImage successfully saved as: {}", path.display()),
    }
}
