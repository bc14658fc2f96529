/// Divide uma linha de comando em tokens separados por espaço.
///
/// Aspas simples ou duplas agrupam um token com espaços; dentro delas
/// `\n`, `\t`, `\\`, `\"` e `\'` são escapes. Aspas sem fechamento vão
/// até o fim da linha.
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;
    // token entre aspas pode ser vazio ("")
    let mut quoted = false;
    let mut quote_char = '"';
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quote {
            if c == quote_char {
                in_quote = false;
            } else if c == '\\' {
                match chars.peek() {
                    Some(&'n') => current.push('\n'),
                    Some(&'t') => current.push('\t'),
                    Some(&next) if matches!(next, '\\' | '"' | '\'') => current.push(next),
                    _ => {
                        current.push(c);
                        continue;
                    }
                }
                chars.next();
            } else {
                current.push(c);
            }
        } else if c == '"' || c == '\'' {
            in_quote = true;
            quoted = true;
            quote_char = c;
        } else if c.is_whitespace() {
            if !current.is_empty() || quoted {
                tokens.push(std::mem::take(&mut current));
                quoted = false;
            }
        } else {
            current.push(c);
        }
    }

    if !current.is_empty() || quoted {
        tokens.push(current);
    }

    tokens
}
