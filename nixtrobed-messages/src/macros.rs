/// Render a message template, substituting `key = value` pairs.
///
/// ```
/// use nixtrobed_messages::{msg, MESSAGES};
///
/// let text = msg!(MESSAGES.target_starting, name = "fedora33");
/// assert!(text.contains("fedora33"));
/// ```
#[macro_export]
macro_rules! msg {
    ($template:expr) => {
        $crate::builder::MessageBuilder::new($template).build()
    };
    ($template:expr, $($key:ident = $value:expr),+ $(,)?) => {
        {
            let mut builder = $crate::builder::MessageBuilder::new($template);
            $(
                builder = builder.var(stringify!($key), $value);
            )+
            builder.build()
        }
    };
}
