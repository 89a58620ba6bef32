use crate::grid_format::*;

///LHAPDF-style set description. Placeholders are `{{KEY}}` (or `{{ KEY }}`).
pub const DEFAULT_INFO_TEMPLATE : &str = "SetDesc: \"{{SETNAME}}: Gaussian process resampling of {{PRIOR}}\"
SetIndex: 0
Authors: gppdf
Reference: none
Format: lhagrid1
DataVersion: 1
NumMembers: {{NMEMBERS}}
Particle: 2212
Flavors: [{{FLAVOURS}}]
NumFlavors: {{NFLAVORS}}
ErrorType: replicas
XMin: {{XMIN}}
XMax: {{XMAX}}
QMin: {{QMIN}}
QMax: {{QMAX}}
Interpolator: logcubic
Extrapolator: continuation
";

///The values an info template can refer to.
#[derive(Clone, Debug, PartialEq)]
pub struct InfoFields {
    pub set_name : String,
    pub prior : String,
    pub xmin : f64,
    pub xmax : f64,
    pub qmin : f64,
    pub qmax : f64,
    pub num_members : usize,
    pub flavours : Vec<i32>
}

impl InfoFields {
    pub fn substitutions(&self) -> Vec<(&'static str, String)> {
        let flavours : Vec<String> = self.flavours.iter().map(|f| f.to_string()).collect();
        vec![("SETNAME", self.set_name.clone()),
             ("PRIOR", self.prior.clone()),
             ("XMIN", format_grid_value(self.xmin)),
             ("XMAX", format_grid_value(self.xmax)),
             ("QMIN", format_grid_value(self.qmin)),
             ("QMAX", format_grid_value(self.qmax)),
             ("NMEMBERS", self.num_members.to_string()),
             ("FLAVOURS", flavours.join(", ")),
             ("NFLAVORS", self.flavours.len().to_string())]
    }
}

pub fn render_info(template : &str, fields : &InfoFields) -> String {
    let mut rendered = template.to_string();
    for (key, value) in fields.substitutions() {
        rendered = rendered.replace(&format!("{{{{{}}}}}", key), &value)
                           .replace(&format!("{{{{ {} }}}}", key), &value);
    }
    rendered
}
