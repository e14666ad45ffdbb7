/// Rewrites a recorded path relative to the nearest enclosing root marker.
///
/// Components are taken from the file name upward until one equals a marker
/// (case-sensitive); the marker is kept. Without any marker the result is the
/// bare file name. Output always uses `/`.
///
/// `C:\Proj\Source\Foo\Bar.cpp` with marker `Source` becomes `Source/Foo/Bar.cpp`.
pub fn normalize_path(recorded: &str, markers: &[String]) -> String {
    let components: Vec<&str> = recorded
        .split(['\\', '/'])
        .filter(|c| !c.is_empty() && *c != ".")
        .collect();

    let mut local = Vec::new();
    for component in components.iter().rev() {
        local.push(*component);
        if markers.iter().any(|m| m == component) {
            local.reverse();
            return local.join("/");
        }
    }

    components.last().map(|c| c.to_string()).unwrap_or_default()
}
