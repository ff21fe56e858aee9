/// Builds a [`Listener`](crate::Listener) calling `$method(id)` on a clone of `$handler`.
#[macro_export]
macro_rules! listener {
    ($handler:ident.$method:ident) => {
        $crate::listener::Listener::new({
            let handler = $handler.clone();
            move |id| {
                handler.$method(id);
            }
        })
    };
}
