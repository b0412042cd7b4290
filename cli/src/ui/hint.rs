//! Hint shown under the terminal QR code.

const ZOOM_HINT: &str = "\n\u{26a0}\u{fe0f}  Press \"cmd + -\" a few times to see the full \
QR Code!\nIf that doesn't work run \"lndconnect -j\" to get a code you can copy paste \
into the app.";

/// Print the zoom hint.
pub fn print_hint() {
    println!("{}", ZOOM_HINT);
}
