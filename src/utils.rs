pub fn set_panic_hook() {
    // 开启 console_error_panic_hook 后，panic 信息会完整打到浏览器控制台。
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
