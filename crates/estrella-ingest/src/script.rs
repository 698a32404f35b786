/// Split a SQL script into statements on `;`, treating `$$`-delimited
/// blocks as opaque so function bodies survive intact.
///
/// Line-based: blank lines are dropped, a line containing a single `$$`
/// marker toggles the opaque state, and a statement ends when a line closes
/// with `;` outside such a block.
pub fn split_statements(script: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut outside_dollar_block = true;

    for line in script.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(line);

        if line.matches("$$").count() == 1 {
            outside_dollar_block = !outside_dollar_block;
        }
        if outside_dollar_block && line.ends_with(';') {
            statements.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        statements.push(current);
    }
    statements
}
