//! Common source code fixtures for tests.

pub const DECLARATION_WITH_CALL: &str = r#"
class Calc {
    int compute() {
        return 5;
    }

    void run() {
        int x = compute();
    }
}
"#;

pub const REASSIGNMENT: &str = r#"
class Calc {
    void run() {
        int y = 3;
        int x = 1;
        x = y;
    }
}
"#;

pub const MUTUAL_RECURSION: &str = r#"
class Loop {
    int seed;

    int ping(int n) {
        return pong(seed);
    }

    int pong(int n) {
        return ping(seed);
    }

    void run() {
        int x = ping(1);
    }
}
"#;

pub const PARAMETER_CHAIN: &str = r#"
class Chain {
    void f(int p) {
    }

    void g(int q) {
        f(q);
    }

    void main() {
        f(42);
        g(7);
    }
}
"#;

pub const INTERFACE_FAN_OUT: &str = r#"
interface Shape {
    int sides();
}

class Triangle implements Shape {
    public int sides() {
        return 3;
    }
}

class Square implements Shape {
    public int sides() {
        return 4;
    }
}

class Drawing {
    int count(Shape s) {
        int x = s.sides();
        return x;
    }
}
"#;

pub const GETTER_CHAIN: &str = r#"
class Person {
    String name;

    Person(String name) {
        this.name = name;
    }

    String getName() {
        return name;
    }
}

class Shop {
    void run() {
        Person p = new Person("Ada");
        String n = p.getName();
    }
}
"#;

/// A class whose `run` assigns `x` from a call chain `levels` deep and
/// from one `shallow` levels deep.
pub fn two_chain_source(deep: usize, shallow: usize) -> String {
    let mut out = String::from("class Depth {\n");
    for (prefix, levels) in [("deep", deep), ("shallow", shallow)] {
        for i in 0..levels {
            out.push_str(&format!(
                "    int {prefix}{i}() {{ return {prefix}{}(); }}\n",
                i + 1
            ));
        }
        out.push_str(&format!("    int {prefix}{levels}() {{ return {levels}; }}\n"));
    }
    out.push_str("    void run() {\n        int x = 0;\n        x = deep0();\n        x = shallow0();\n    }\n}\n");
    out
}
