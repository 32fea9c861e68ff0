//! Multiple-choice quizzes on PDE basics, finite differences, and boundary
//! conditions.
//!
//! The question bank is static: three sets of five questions each. Grading is
//! exact string comparison against the stored answer; an unanswered question
//! counts as incorrect.

/// A single multiple-choice question.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub id: u32,
    pub prompt: &'static str,
    pub options: [&'static str; 4],
    pub answer: &'static str,
    pub explanation: &'static str,
}

/// Outcome of grading one question.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect {
        answer: &'static str,
        explanation: &'static str,
    },
}

impl Verdict {
    /// Return `true` if `self` is `Correct`.
    pub fn is_correct(&self) -> bool { matches!(self, Self::Correct) }

    /// Return `true` if `self` is `Incorrect`.
    pub fn is_incorrect(&self) -> bool { matches!(self, Self::Incorrect { .. }) }

    /// Feedback line for question `id`.
    pub fn headline(&self, id: u32) -> String {
        match self {
            Self::Correct => format!("✅ 题号 {id}：恭喜！回答正确。"),
            Self::Incorrect { .. } => format!("❌ 题号 {id}：很遗憾，答案不正确。"),
        }
    }
}

impl Question {
    /// Grade a response. `None` means the question was left unanswered.
    pub fn grade(&self, response: Option<&str>) -> Verdict {
        match response {
            Some(r) if r == self.answer => Verdict::Correct,
            _ => Verdict::Incorrect {
                answer: self.answer,
                explanation: self.explanation,
            },
        }
    }

    /// Option at `index`, if any.
    pub fn option(&self, index: usize) -> Option<&'static str> {
        self.options.get(index).copied()
    }
}

/// A named, ordered set of questions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QuizSet {
    pub name: &'static str,
    pub questions: &'static [Question],
}

/// Graded responses for a whole set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub set: &'static str,
    pub verdicts: Vec<(u32, Verdict)>,
    pub correct: usize,
    pub total: usize,
}

impl Report {
    /// Return `true` if every question was answered correctly.
    pub fn is_perfect(&self) -> bool { self.correct == self.total }

    /// Closing score line.
    pub fn summary(&self) -> String {
        if self.is_perfect() {
            format!("🎉 完美！您全部答对了 {}/{} 题！", self.correct, self.total)
        } else {
            format!("总分：您答对了 {}/{} 题。", self.correct, self.total)
        }
    }
}

impl QuizSet {
    /// Grade responses given in question order; missing trailing responses
    /// count as unanswered.
    pub fn grade(&self, responses: &[Option<&str>]) -> Report {
        let verdicts: Vec<(u32, Verdict)> = self.questions.iter()
            .enumerate()
            .map(|(k, q)| (q.id, q.grade(responses.get(k).copied().flatten())))
            .collect();
        let correct = verdicts.iter().filter(|(_, v)| v.is_correct()).count();
        Report {
            set: self.name,
            verdicts,
            correct,
            total: self.questions.len(),
        }
    }
}

/// All quiz sets, in display order.
pub fn sets() -> &'static [QuizSet] { &QUIZ_SETS }

/// Look up a set by name.
pub fn find_set(name: &str) -> Option<&'static QuizSet> {
    QUIZ_SETS.iter().find(|set| set.name == name)
}

/// Look up a question by id across all sets.
pub fn question(id: u32) -> Option<&'static Question> {
    QUIZ_SETS.iter()
        .flat_map(|set| set.questions.iter())
        .find(|q| q.id == id)
}

static QUIZ_SETS: [QuizSet; 3] = [
    QuizSet { name: "基础知识 (第 1 套)", questions: &SET_1 },
    QuizSet { name: "进阶 FDM 基础应用 (第 2 套)", questions: &SET_2 },
    QuizSet { name: "综合边界条件与稳定性判断 (第 3 套)", questions: &SET_3 },
];

static SET_1: [Question; 5] = [
    Question {
        id: 1,
        prompt: "热传导方程在数学上属于哪一类偏微分方程？",
        options: ["椭圆型", "双曲型", "抛物线型", "混合型"],
        answer: "抛物线型",
        explanation: "热传导方程包含对时间的奇数阶导数（一阶），描述扩散过程，属于**抛物线型**。相关知识链接：[知识点链接：PDE分类]",
    },
    Question {
        id: 2,
        prompt: "描述波传播的波动方程，在数学上属于哪一类偏微分方程？",
        options: ["椭圆型", "双曲型", "抛物线型", "混合型"],
        answer: "双曲型",
        explanation: "波动方程包含对时间的偶数阶导数（二阶），描述波动过程，属于**双曲型**。相关知识链接：[知识点链接：波动方程]",
    },
    Question {
        id: 3,
        prompt: "稳态（不含时间项）的热传导方程通常被称为？",
        options: ["薛定谔方程", "纳维-斯托克斯方程", "泊松方程", "拉普拉斯方程"],
        answer: "拉普拉斯方程",
        explanation: r"当 $\frac{\partial u}{\partial t}=0$ 时，方程简化为拉普拉斯方程 $\nabla^2 u = 0$。相关知识链接：[知识点链接：拉普拉斯方程]",
    },
    Question {
        id: 4,
        prompt: r"$\nabla^2 u$ 在方程中代表的物理意义是？",
        options: ["梯度", "时间导数", "空间曲率/散度", "对流项"],
        answer: "空间曲率/散度",
        explanation: "它是拉普拉斯算子，在物理上描述了场的空间变化趋势（曲率或散度）。相关知识链接：[知识点链接：算子]",
    },
    Question {
        id: 5,
        prompt: "在有限差分法中，空间二阶导数通常至少需要几个相邻的网格点进行离散？",
        options: ["2 个", "3 个", "4 个", "5 个"],
        answer: "3 个",
        explanation: "中心差分格式需要 $u_{i-1}, u_{i}, u_{i+1}$ 三个点来近似二阶导数。相关知识链接：[知识点链接：FDM]",
    },
];

static SET_2: [Question; 5] = [
    Question {
        id: 6,
        prompt: "在一维热传导 FDM 显式格式中，迭代公式 $u_i^{n+1}$ 仅依赖于哪一时间步的数据？",
        options: ["$u^{n+1}$ 步", "$u^{n}$ 步", "所有历史时间步", "边界条件"],
        answer: "$u^{n}$ 步",
        explanation: "显式格式的特点是当前时间步（$n+1$）的解可以直接从前一时间步（$n$）的数据计算得到，无需解方程组。相关知识链接：[知识点链接：显式FDM]",
    },
    Question {
        id: 7,
        prompt: r"对于时间导数 $\frac{\partial u}{\partial t}$，若采用**中心差分**格式进行离散，则该格式的精度是多少阶？",
        options: [r"一阶 $O(\Delta t)$", r"二阶 $O(\Delta t^2)$", r"三阶 $O(\Delta t^3)$", "零阶"],
        answer: r"二阶 $O(\Delta t^2)$",
        explanation: r"时间中心差分 $\frac{u^{n+1}-u^{n-1}}{2\Delta t}$ 具有二阶精度。但在显式 FDM 中，通常使用前向差分（一阶精度）。相关知识链接：[知识点链接：差分精度]",
    },
    Question {
        id: 8,
        prompt: "有限元法（FEM）的核心思想是将微分方程首先转化为哪种形式进行求解？",
        options: ["解析解", "强形式", "特征值形式", "弱形式（积分形式）"],
        answer: "弱形式（积分形式）",
        explanation: "FEM 通过将微分方程乘以权函数并在求解域上积分，将其转化为积分形式（弱形式），降低了对解的光滑度要求。相关知识链接：[知识点链接：FEM弱形式]",
    },
    Question {
        id: 9,
        prompt: r"在 FDM 显式格式中，如果时间步长 $\Delta t$ **过大**，可能导致的结果是？",
        options: ["收敛速度变慢", "数值解精度提高", "数值解发散（不稳定）", "计算效率提高"],
        answer: "数值解发散（不稳定）",
        explanation: r"显式格式受 Courant-Friedrichs-Lewy (CFL) 条件限制，$\Delta t$ 过大将破坏数值稳定性，导致解发散。相关知识链接：[知识点链接：CFL条件]",
    },
    Question {
        id: 10,
        prompt: "相比于 FDM，有限体积法（FVM）在流体力学（CFD）中更受欢迎的主要原因是？",
        options: ["精度更高", "编程更简单", "更容易保证物理量的守恒性", "速度更快"],
        answer: "更容易保证物理量的守恒性",
        explanation: "FVM 是基于积分形式的守恒律推导的，天生具备在局部和全局上严格满足质量、动量和能量守恒的特性。相关知识链接：[知识点链接：FVM]",
    },
];

static SET_3: [Question; 5] = [
    Question {
        id: 11,
        prompt: "在热传导问题中，将边界处的温度**固定为已知常数**（例如 $u(L, t)=100$）属于哪种类型的边界条件？",
        options: ["诺伊曼条件 (Neumann)", "柯西条件 (Cauchy)", "迪里赫利条件 (Dirichlet)", "周期性条件"],
        answer: "迪里赫利条件 (Dirichlet)",
        explanation: "迪里赫利条件指定边界上的**函数值**（即温度值）为已知。诺伊曼条件指定导数（即热通量）。相关知识链接：[知识点链接：边界条件]",
    },
    Question {
        id: 12,
        prompt: "在绝热边界上（无热量交换），应施加哪种边界条件？",
        options: ["$u=0$", r"$\frac{\partial u}{\partial t}=0$", r"$\frac{\partial u}{\partial n}=0$", "$u=f(t)$"],
        answer: r"$\frac{\partial u}{\partial n}=0$",
        explanation: r"绝热意味着边界上的热通量为零，热通量与温度的法向导数（$\frac{\partial u}{\partial n}$）成正比，因此施加诺伊曼条件（零法向导数）。相关知识链接：[知识点链接：诺伊曼条件]",
    },
    Question {
        id: 13,
        prompt: r"对于瞬态 PDE，若采用**隐式**有限差分格式求解，其在时间步长 $\Delta t$ 方面的稳定性特点是？",
        options: ["无条件稳定", "需满足CFL条件", "稳定性取决于空间步长", "无条件不稳定"],
        answer: "无条件稳定",
        explanation: r"隐式格式（如 Crank-Nicolson）在理论上对任何 $\Delta t$ 都是稳定的，尽管大的 $\Delta t$ 会降低精度。相关知识链接：[知识点链接：隐式FDM]",
    },
    Question {
        id: 14,
        prompt: r"泊松方程 $\nabla^2 u = f$ 属于哪一类 PDE？它通常描述的是什么状态？",
        options: ["抛物型；扩散状态", "椭圆型；稳态平衡", "双曲型；波动状态", "混合型；非线性状态"],
        answer: "椭圆型；稳态平衡",
        explanation: "泊松方程和拉普拉斯方程一样，不含时间项，描述系统达到稳定平衡时的状态，属于**椭圆型**。相关知识链接：[知识点链接：PDE分类]",
    },
    Question {
        id: 15,
        prompt: "物理信息神经网络（PINNs）中，$Loss_{physics}$ 项的计算需要利用深度学习框架的哪一项关键技术？",
        options: ["蒙特卡洛采样", "稀疏矩阵求解器", "自动微分 (Auto-differentiation)", "L2正则化"],
        answer: "自动微分 (Auto-differentiation)",
        explanation: "PINNs 通过自动微分计算网络输出（$u$）对输入变量（$x, t$）的偏导数，从而计算 PDE 残差。相关知识链接：[知识点链接：PINNs原理]",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_shape() {
        assert_eq!(sets().len(), 3);
        assert!(sets().iter().all(|set| set.questions.len() == 5));
        let ids: Vec<u32> = sets().iter()
            .flat_map(|set| set.questions.iter().map(|q| q.id))
            .collect();
        assert_eq!(ids, (1..=15).collect::<Vec<u32>>());
        // every answer is one of its options
        for set in sets() {
            for q in set.questions {
                assert!(q.options.contains(&q.answer), "question {}", q.id);
            }
        }
    }

    #[test]
    fn heat_equation_is_parabolic() {
        let q = question(1).unwrap();
        assert_eq!(q.grade(Some("抛物线型")), Verdict::Correct);
        for wrong in ["椭圆型", "双曲型", "混合型"] {
            match q.grade(Some(wrong)) {
                Verdict::Incorrect { answer, explanation } => {
                    assert_eq!(answer, "抛物线型");
                    assert_eq!(explanation, q.explanation);
                },
                Verdict::Correct => panic!("{wrong} graded correct"),
            }
        }
    }

    #[test]
    fn unanswered_is_incorrect() {
        let q = question(12).unwrap();
        assert!(q.grade(None).is_incorrect());
        assert!(q.grade(Some(q.option(2).unwrap())).is_correct());
    }

    #[test]
    fn set_report() {
        let set = find_set("基础知识 (第 1 套)").unwrap();
        let all: Vec<Option<&str>> = set.questions.iter().map(|q| Some(q.answer)).collect();
        let report = set.grade(&all);
        assert!(report.is_perfect());
        assert_eq!(report.summary(), "🎉 完美！您全部答对了 5/5 题！");

        let partial = set.grade(&[Some("抛物线型"), Some("椭圆型")]);
        assert_eq!(partial.correct, 1);
        assert!(!partial.is_perfect());
        assert_eq!(partial.summary(), "总分：您答对了 1/5 题。");
        assert!(partial.verdicts[4].1.is_incorrect());
    }

    #[test]
    fn unknown_lookups() {
        assert!(find_set("第 4 套").is_none());
        assert!(question(16).is_none());
    }
}
