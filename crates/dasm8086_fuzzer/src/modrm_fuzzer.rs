/*
    dasm8086
    Copyright 2022-2025 Daniel Balsom

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.
*/
use dasm8086::modrm::ModRmByte;
use rand::{prelude::StdRng, Rng};

/// Builds random ModRM bytes, optionally constraining individual fields.
pub struct ModRmFuzzer {
    allow_reg_form: bool,
    r#mod: Option<u8>,
    reg: Option<u8>,
    rm: Option<u8>,
}

impl Default for ModRmFuzzer {
    fn default() -> Self {
        Self {
            allow_reg_form: true,
            r#mod: None,
            reg: None,
            rm: None,
        }
    }
}

impl ModRmFuzzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reg_form(mut self, allow_reg_form: bool) -> Self {
        self.allow_reg_form = allow_reg_form;
        self
    }

    pub fn with_mod(mut self, r#mod: u8) -> Self {
        self.r#mod = Some(r#mod);
        self
    }

    pub fn with_reg(mut self, reg: u8) -> Self {
        self.reg = Some(reg);
        self
    }

    pub fn with_rm(mut self, rm: u8) -> Self {
        self.rm = Some(rm);
        self
    }

    pub fn build(&self, rng: &mut StdRng) -> ModRmByte {
        let raw_byte: u8 = rng.random();
        let mut modrm = ModRmByte::from_byte(raw_byte);

        if let Some(r#mod) = self.r#mod {
            modrm.set_mod(r#mod);
        }
        else if !self.allow_reg_form {
            // Ensure we don't generate a reg form (mod == 11)
            modrm.set_mod(rng.random_range(0..=2));
        }

        if let Some(reg) = self.reg {
            modrm.set_reg(reg);
        }
        if let Some(rm) = self.rm {
            modrm.set_rm(rm);
        }

        modrm
    }
}
